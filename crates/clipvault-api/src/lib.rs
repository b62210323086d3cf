//! Clipvault API Library
//!
//! HTTP handlers, the upload orchestrator and application setup.

mod handlers;
mod middleware;
mod telemetry;

pub mod auth;
pub mod constants;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{MediaUploadService, UploadStage};
