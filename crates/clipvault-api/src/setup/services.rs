//! Build the upload flows and the shared state.

use super::storage::StorageHandles;
use crate::state::{AppState, UploadFlow};
use anyhow::{anyhow, Context, Result};
use clipvault_core::models::MediaKind;
use clipvault_core::{Config, PlacementBackend};
use clipvault_db::VideoRepository;
use clipvault_processing::{
    InlinePlacement, LocalDiskPlacement, MediaClassifier, ObjectStorePlacement, PlacementStrategy,
    UploadValidator,
};
use clipvault_storage::StagingArea;
use std::sync::Arc;
use std::time::Duration;

pub async fn initialize_services(
    config: &Config,
    videos: Arc<dyn VideoRepository>,
    storage: StorageHandles,
) -> Result<Arc<AppState>> {
    let staging = StagingArea::new(config.scratch_root.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to create scratch directory {}",
                config.scratch_root.display()
            )
        })?;

    let classifier = MediaClassifier::new(
        config.ffprobe_path.clone(),
        Duration::from_secs(config.probe_timeout_secs),
    );

    let thumbnails = UploadFlow {
        validator: UploadValidator::new(MediaKind::Thumbnail, config.max_thumbnail_size_bytes),
        placement: placement_for(
            MediaKind::Thumbnail,
            config.thumbnail_placement,
            &storage,
            &classifier,
        )?,
    };

    let video_files = UploadFlow {
        validator: UploadValidator::new(MediaKind::Video, config.max_video_size_bytes),
        placement: placement_for(
            MediaKind::Video,
            config.video_placement,
            &storage,
            &classifier,
        )?,
    };

    tracing::info!(
        scratch_root = %staging.root().display(),
        thumbnail_backend = %thumbnails.placement.backend(),
        video_backend = %video_files.placement.backend(),
        "Upload flows initialized"
    );

    Ok(Arc::new(AppState {
        config: Arc::new(config.clone()),
        videos,
        staging,
        thumbnails,
        video_files,
    }))
}

fn placement_for(
    kind: MediaKind,
    backend: PlacementBackend,
    storage: &StorageHandles,
    classifier: &MediaClassifier,
) -> Result<Arc<dyn PlacementStrategy>> {
    let placement: Arc<dyn PlacementStrategy> = match backend {
        PlacementBackend::Local => Arc::new(LocalDiskPlacement::new(storage.local.clone(), kind)),
        PlacementBackend::Inline => Arc::new(InlinePlacement::new(kind)),
        PlacementBackend::S3 => {
            let object = storage
                .object
                .clone()
                .ok_or_else(|| anyhow!("Object storage is not configured for {} uploads", kind))?;
            Arc::new(ObjectStorePlacement::new(object, classifier.clone(), kind))
        }
    };
    Ok(placement)
}
