use crate::error::HttpAppError;
use crate::services::upload::MediaUploadService;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use clipvault_core::models::MediaKind;
use std::sync::Arc;

/// `POST /api/videos/{video_id}` with an mp4 in the `video` part.
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<()>, HttpAppError> {
    MediaUploadService::new(&state)
        .upload(MediaKind::Video, &video_id, &headers, multipart)
        .await?;

    Ok(Json(()))
}
