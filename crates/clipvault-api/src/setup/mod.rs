//! Application setup and initialization
//!
//! Everything `main` needs to go from a [`Config`] to a running router. The
//! pieces are public so integration tests can assemble the same router over
//! in-memory backends.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use clipvault_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        thumbnail_placement = %config.thumbnail_placement,
        video_placement = %config.video_placement,
        "Configuration loaded and validated successfully"
    );

    let videos = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = services::initialize_services(&config, videos, storage).await?;
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
