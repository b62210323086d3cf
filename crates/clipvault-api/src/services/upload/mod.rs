//! Upload orchestration
//!
//! [`MediaUploadService`] drives one upload through
//! validate → stage → place → persist for either media kind.

mod service;

pub use service::{MediaUploadService, UploadStage};
