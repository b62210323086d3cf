use crate::auth::{get_bearer_token, validate_jwt};
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use clipvault_core::models::{Video, VideoResponse};
use clipvault_core::AppError;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /api/videos`: create an empty record owned by the caller, ready to
/// receive a thumbnail and a video.
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VideoResponse>), HttpAppError> {
    let user_id = validate_jwt(get_bearer_token(&headers)?, &state.config.jwt_secret)?;

    let Json(request) = body
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()).into());
    }

    let video = state
        .videos
        .create_video(&Video::new(user_id, title, request.description))
        .await?;

    tracing::info!(video_id = %video.id, user_id = %user_id, "Video record created");

    Ok((StatusCode::CREATED, Json(video.into())))
}
