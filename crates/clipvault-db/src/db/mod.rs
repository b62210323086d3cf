//! Database repositories for data access layer
//!
//! The upload pipeline reads one record per request and writes back a single
//! reference field, so the repository surface is intentionally small.

mod memory;
mod video;

pub use memory::InMemoryVideoRepository;
pub use video::PgVideoRepository;

use async_trait::async_trait;
use clipvault_core::models::Video;
use clipvault_core::AppError;
use uuid::Uuid;

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Overwrite the mutable fields of an existing record.
    /// Fails with `NotFound` if the record is gone.
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;
}
