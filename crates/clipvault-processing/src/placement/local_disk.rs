use super::{PlacementError, PlacementResult, PlacementStrategy};
use async_trait::async_trait;
use clipvault_core::models::{MediaKind, Orientation};
use clipvault_core::PlacementBackend;
use clipvault_storage::{new_key, StagedFile, Storage};
use std::sync::Arc;
use uuid::Uuid;

/// Copies uploads into the served assets directory under a random filename.
pub struct LocalDiskPlacement {
    storage: Arc<dyn Storage>,
    kind: MediaKind,
}

impl LocalDiskPlacement {
    pub fn new(storage: Arc<dyn Storage>, kind: MediaKind) -> Self {
        Self { storage, kind }
    }
}

#[async_trait]
impl PlacementStrategy for LocalDiskPlacement {
    #[tracing::instrument(skip(self, staged), fields(kind = %self.kind, size_bytes = staged.len()))]
    async fn place(
        &self,
        staged: &StagedFile,
        media_type: &str,
        _media_id: Uuid,
        _orientation: Option<Orientation>,
    ) -> Result<PlacementResult, PlacementError> {
        let filename = new_key(media_type, self.kind.allowed_content_types())?;

        let reference = self
            .storage
            .upload_file(&filename, staged.path(), media_type)
            .await?;

        Ok(PlacementResult {
            reference,
            storage_key: Some(filename),
            orientation: None,
        })
    }

    fn backend(&self) -> PlacementBackend {
        PlacementBackend::Local
    }
}
