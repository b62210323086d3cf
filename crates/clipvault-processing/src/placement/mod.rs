//! Placement strategies
//!
//! A placement takes a staged upload and makes it durable somewhere a client
//! can reach it, returning the reference string stored on the record. Which
//! strategy runs for a flow is decided once at startup.

mod inline;
mod local_disk;
mod remote;

pub use inline::InlinePlacement;
pub use local_disk::LocalDiskPlacement;
pub use remote::ObjectStorePlacement;

use crate::probe::{MediaClassifier, ProbeError};
use async_trait::async_trait;
use clipvault_core::models::Orientation;
use clipvault_core::PlacementBackend;
use clipvault_storage::{StagedFile, StorageError, UnsupportedMediaType};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementResult {
    /// URL or data URI written to the record.
    pub reference: String,
    /// Key the bytes were stored under; absent for inline placement.
    pub storage_key: Option<String>,
    /// Orientation used to pick the key prefix, when the media was probed.
    pub orientation: Option<Orientation>,
}

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("Media probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("Failed to read staged upload: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to store upload: {0}")]
    Upload(#[from] StorageError),

    #[error(transparent)]
    UnsupportedMediaType(#[from] UnsupportedMediaType),
}

#[async_trait]
pub trait PlacementStrategy: Send + Sync {
    /// Classifier to run on the staged file before placing it, for
    /// strategies whose layout depends on orientation.
    fn classifier(&self) -> Option<&MediaClassifier> {
        None
    }

    /// Move `staged` to its final location. `orientation` is the result of
    /// running [`classifier`](Self::classifier), when the caller did. The
    /// staged file itself is left for the caller to release.
    async fn place(
        &self,
        staged: &StagedFile,
        media_type: &str,
        media_id: Uuid,
        orientation: Option<Orientation>,
    ) -> Result<PlacementResult, PlacementError>;

    fn backend(&self) -> PlacementBackend;
}
