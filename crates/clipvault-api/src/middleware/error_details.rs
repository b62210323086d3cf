use crate::error::ErrorResponse;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Error details middleware
/// Re-renders error envelopes with their `details` outside production
pub async fn error_details_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if state.config.is_production() {
        return response;
    }

    let envelope = response
        .extensions()
        .get::<ErrorResponse>()
        .filter(|envelope| envelope.details.is_some())
        .cloned();

    match envelope {
        Some(envelope) => (response.status(), Json(envelope)).into_response(),
        None => response,
    }
}
