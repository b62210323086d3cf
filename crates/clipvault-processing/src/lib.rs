//! Clipvault Processing Library
//!
//! Everything that happens to an upload between staging and persistence:
//! request-level validation, geometry probing through `ffprobe`, and the
//! placement strategies that move staged bytes to their final home.

pub mod placement;
pub mod probe;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use placement::{
    InlinePlacement, LocalDiskPlacement, ObjectStorePlacement, PlacementError, PlacementResult,
    PlacementStrategy,
};
pub use probe::{Geometry, MediaClassifier, ProbeError};
pub use validator::{UploadValidator, ValidationError, MULTIPART_OVERHEAD_BYTES};
