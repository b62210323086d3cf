use async_trait::async_trait;
use clipvault_core::{AppError, Video};
use clipvault_db::{InMemoryVideoRepository, VideoRepository};
use std::sync::Arc;
use uuid::Uuid;

/// Reads and creates go to the wrapped repository; every update fails as if
/// the database connection had dropped.
pub struct FailingUpdatesRepository {
    inner: Arc<InMemoryVideoRepository>,
}

impl FailingUpdatesRepository {
    pub fn new(inner: Arc<InMemoryVideoRepository>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl VideoRepository for FailingUpdatesRepository {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        self.inner.create_video(video).await
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        self.inner.get_video(id).await
    }

    async fn update_video(&self, _video: &Video) -> Result<Video, AppError> {
        Err(AppError::Persistence("connection reset by peer".to_string()))
    }
}
