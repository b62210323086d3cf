//! Application state shared by every handler.

use clipvault_core::models::MediaKind;
use clipvault_core::Config;
use clipvault_db::VideoRepository;
use clipvault_processing::{PlacementStrategy, UploadValidator};
use clipvault_storage::StagingArea;
use std::sync::Arc;

/// Upload pipeline pieces for one media kind.
#[derive(Clone)]
pub struct UploadFlow {
    pub validator: UploadValidator,
    pub placement: Arc<dyn PlacementStrategy>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub videos: Arc<dyn VideoRepository>,
    pub staging: StagingArea,
    pub thumbnails: UploadFlow,
    pub video_files: UploadFlow,
}

impl AppState {
    pub fn flow_for(&self, kind: MediaKind) -> &UploadFlow {
        match kind {
            MediaKind::Thumbnail => &self.thumbnails,
            MediaKind::Video => &self.video_files,
        }
    }
}
