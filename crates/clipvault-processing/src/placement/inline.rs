use super::{PlacementError, PlacementResult, PlacementStrategy};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use clipvault_core::models::{MediaKind, Orientation};
use clipvault_core::PlacementBackend;
use clipvault_storage::{StagedFile, UnsupportedMediaType};
use uuid::Uuid;

/// Embeds the upload in the record itself as a `data:` URI.
pub struct InlinePlacement {
    kind: MediaKind,
}

impl InlinePlacement {
    pub fn new(kind: MediaKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl PlacementStrategy for InlinePlacement {
    #[tracing::instrument(skip(self, staged), fields(kind = %self.kind, size_bytes = staged.len()))]
    async fn place(
        &self,
        staged: &StagedFile,
        media_type: &str,
        _media_id: Uuid,
        _orientation: Option<Orientation>,
    ) -> Result<PlacementResult, PlacementError> {
        if !self.kind.allows(media_type) {
            return Err(UnsupportedMediaType {
                media_type: media_type.to_string(),
                allowed: self
                    .kind
                    .allowed_content_types()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }
            .into());
        }

        let data = tokio::fs::read(staged.path())
            .await
            .map_err(PlacementError::Read)?;

        Ok(PlacementResult {
            reference: format!("data:{};base64,{}", media_type, STANDARD.encode(&data)),
            storage_key: None,
            orientation: None,
        })
    }

    fn backend(&self) -> PlacementBackend {
        PlacementBackend::Inline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use clipvault_storage::StagingArea;
    use tempfile::tempdir;

    #[tokio::test]
    async fn encodes_a_data_uri() {
        let dir = tempdir().unwrap();
        let area = StagingArea::new(dir.path()).await.unwrap();
        let chunks = futures::stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(
            b"\x89PNG",
        ))]);
        let staged = area.stage(chunks, "image/png", 1024).await.unwrap();

        let result = InlinePlacement::new(MediaKind::Thumbnail)
            .place(&staged, "image/png", Uuid::new_v4(), None)
            .await
            .unwrap();

        assert_eq!(result.reference, "data:image/png;base64,iVBORw==");
        assert_eq!(result.storage_key, None);
    }

    #[tokio::test]
    async fn unreadable_staged_bytes_fail_with_read() {
        let dir = tempdir().unwrap();
        let area = StagingArea::new(dir.path()).await.unwrap();
        let chunks = futures::stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(b"x"))]);
        let staged = area.stage(chunks, "image/png", 1024).await.unwrap();
        std::fs::remove_file(staged.path()).unwrap();

        let result = InlinePlacement::new(MediaKind::Thumbnail)
            .place(&staged, "image/png", Uuid::new_v4(), None)
            .await;

        assert!(matches!(result, Err(PlacementError::Read(_))));
    }
}
