//! Authentication: bearer token extraction and HS256 JWT validation.

pub mod jwt;

pub use jwt::{get_bearer_token, make_jwt, validate_jwt, JwtClaims, TOKEN_ISSUER};
