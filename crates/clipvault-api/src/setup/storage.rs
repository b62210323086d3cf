//! Storage setup

use anyhow::{Context, Result};
use clipvault_core::Config;
use clipvault_storage::{create_local_storage, create_object_storage, Storage};
use std::sync::Arc;

/// Byte stores the placements write to.
#[derive(Clone)]
pub struct StorageHandles {
    /// Backs the assets directory served under `/assets`.
    pub local: Arc<dyn Storage>,
    /// Only present when some flow places on the object store.
    pub object: Option<Arc<dyn Storage>>,
}

pub async fn setup_storage(config: &Config) -> Result<StorageHandles> {
    let local = create_local_storage(config)
        .await
        .context("Failed to initialize local asset storage")?;
    tracing::info!(
        assets_root = %config.assets_root.display(),
        base_url = %config.assets_base_url,
        "Local asset storage ready"
    );

    let object = if config.uses_object_store() {
        let storage = create_object_storage(config)
            .await
            .context("Failed to initialize object storage")?;
        tracing::info!(
            bucket = config.s3_bucket.as_deref().unwrap_or_default(),
            cdn = config.s3_cf_distribution.as_deref().unwrap_or("-"),
            "Object storage ready"
        );
        Some(storage)
    } else {
        None
    };

    Ok(StorageHandles { local, object })
}
