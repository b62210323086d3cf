//! Route configuration and setup

use crate::constants::{API_PREFIX, ASSETS_PATH};
use crate::handlers;
use crate::middleware::error_details_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use clipvault_core::Config;
use clipvault_processing::MULTIPART_OVERHEAD_BYTES;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config);

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .nest(API_PREFIX, api_routes(config))
        .nest_service(ASSETS_PATH, ServeDir::new(&config.assets_root))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            error_details_middleware,
        ))
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// JSON routes keep axum's default body limit. Only the two upload routes
/// accept bodies up to the largest upload ceiling.
fn api_routes(config: &Config) -> Router<Arc<AppState>> {
    // Oversized bodies surface as multipart read errors (400), not 413
    let upload_limit = config
        .max_video_size_bytes
        .max(config.max_thumbnail_size_bytes)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let upload_limit = DefaultBodyLimit::max(usize::try_from(upload_limit).unwrap_or(usize::MAX));

    Router::new()
        .route("/videos", post(handlers::video_create::create_video))
        .route("/videos/{video_id}", get(handlers::video_get::get_video))
        .route(
            "/videos/{video_id}",
            post(handlers::video_upload::upload_video).layer(upload_limit),
        )
        .route(
            "/videos/{video_id}/thumbnail",
            post(handlers::thumbnail_upload::upload_thumbnail).layer(upload_limit),
        )
}

fn setup_cors(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allows_any_origin() {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}
