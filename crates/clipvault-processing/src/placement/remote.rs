use super::{PlacementError, PlacementResult, PlacementStrategy};
use crate::probe::MediaClassifier;
use async_trait::async_trait;
use clipvault_core::models::{MediaKind, Orientation};
use clipvault_core::PlacementBackend;
use clipvault_storage::{new_key, StagedFile, Storage};
use std::sync::Arc;
use uuid::Uuid;

/// Stores uploads on the object store under an orientation prefix:
/// `<orientation>/<media id>/<random filename>`. The orientation comes from
/// the caller's classification step, or from probing here when none is given.
pub struct ObjectStorePlacement {
    storage: Arc<dyn Storage>,
    classifier: MediaClassifier,
    kind: MediaKind,
}

impl ObjectStorePlacement {
    pub fn new(storage: Arc<dyn Storage>, classifier: MediaClassifier, kind: MediaKind) -> Self {
        Self {
            storage,
            classifier,
            kind,
        }
    }
}

#[async_trait]
impl PlacementStrategy for ObjectStorePlacement {
    #[tracing::instrument(skip(self, staged), fields(kind = %self.kind, size_bytes = staged.len()))]
    async fn place(
        &self,
        staged: &StagedFile,
        media_type: &str,
        media_id: Uuid,
        orientation: Option<Orientation>,
    ) -> Result<PlacementResult, PlacementError> {
        let filename = new_key(media_type, self.kind.allowed_content_types())?;
        let orientation = match orientation {
            Some(orientation) => orientation,
            None => self.classifier.classify(staged.path()).await?,
        };

        let key = format!("{}/{}/{}", orientation.key_prefix(), media_id, filename);

        let reference = self
            .storage
            .upload_file(&key, staged.path(), media_type)
            .await?;

        tracing::info!(
            key = %key,
            orientation = %orientation,
            "Placed upload on object store"
        );

        Ok(PlacementResult {
            reference,
            storage_key: Some(key),
            orientation: Some(orientation),
        })
    }

    fn classifier(&self) -> Option<&MediaClassifier> {
        Some(&self.classifier)
    }

    fn backend(&self) -> PlacementBackend {
        PlacementBackend::S3
    }
}
