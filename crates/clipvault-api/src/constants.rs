/// Prefix of every authenticated route.
pub const API_PREFIX: &str = "/api";

/// Path the local assets root is served under.
pub const ASSETS_PATH: &str = "/assets";
