use crate::auth::{get_bearer_token, validate_jwt};
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use clipvault_core::models::VideoResponse;
use clipvault_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Owner-only read of a video record.
#[tracing::instrument(skip(state, headers))]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)
        .map_err(|_| AppError::BadRequest("Invalid video ID".to_string()))?;

    let user_id = validate_jwt(get_bearer_token(&headers)?, &state.config.jwt_secret)?;

    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user_id) {
        return Err(AppError::Forbidden("Not authorized to view this video".to_string()).into());
    }

    Ok(Json(video.into()))
}
