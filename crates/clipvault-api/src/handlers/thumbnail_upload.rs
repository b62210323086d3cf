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

/// `POST /api/videos/{video_id}/thumbnail` with the image in the `thumbnail` part.
///
/// Responds `200` with a `null` body; the new reference is on the record.
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<()>, HttpAppError> {
    MediaUploadService::new(&state)
        .upload(MediaKind::Thumbnail, &video_id, &headers, multipart)
        .await?;

    Ok(Json(()))
}
