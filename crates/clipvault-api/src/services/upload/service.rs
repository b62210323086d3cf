use crate::auth::{get_bearer_token, validate_jwt};
use crate::error::HttpAppError;
use crate::state::{AppState, UploadFlow};
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::http::{header::CONTENT_LENGTH, HeaderMap};
use clipvault_core::models::{MediaKind, Video};
use clipvault_core::AppError;
use clipvault_processing::PlacementResult;
use clipvault_storage::StagedFile;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use uuid::Uuid;

/// Where an upload is in the pipeline. `Classifying` is only entered by
/// flows whose placement depends on orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Validating,
    Staging,
    Classifying,
    Placing,
    Persisting,
    Done,
}

impl Display for UploadStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadStage::Validating => write!(f, "validating"),
            UploadStage::Staging => write!(f, "staging"),
            UploadStage::Classifying => write!(f, "classifying"),
            UploadStage::Placing => write!(f, "placing"),
            UploadStage::Persisting => write!(f, "persisting"),
            UploadStage::Done => write!(f, "done"),
        }
    }
}

fn enter(stage: UploadStage) {
    tracing::info!(stage = %stage, "Upload stage");
}

fn missing_file(kind: MediaKind) -> AppError {
    match kind {
        MediaKind::Thumbnail => AppError::BadRequest("Thumbnail file missing".to_string()),
        MediaKind::Video => AppError::BadRequest("Video file missing".to_string()),
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Media upload service
///
/// Runs the whole upload for one request. The record's reference field is
/// written at most once, and only after placement succeeded.
pub struct MediaUploadService {
    state: Arc<AppState>,
}

impl MediaUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Complete upload workflow: authorize → validate → stage → place → persist
    ///
    /// The multipart body is only read once the caller has been shown to own
    /// the record and the declared length fits the flow's ceiling.
    #[tracing::instrument(skip(self, headers, multipart), fields(kind = %kind))]
    pub async fn upload(
        &self,
        kind: MediaKind,
        video_id: &str,
        headers: &HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Video, HttpAppError> {
        let flow = self.state.flow_for(kind);
        enter(UploadStage::Validating);

        let video_id = Uuid::parse_str(video_id)
            .map_err(|_| AppError::BadRequest("Invalid video ID".to_string()))?;

        let token = get_bearer_token(headers)?;
        let user_id = validate_jwt(token, &self.state.config.jwt_secret)?;

        let mut video = self
            .state
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

        if !video.is_owned_by(user_id) {
            return Err(
                AppError::Forbidden("Not authorized to update this video".to_string()).into(),
            );
        }

        flow.validator
            .validate_declared_length(declared_length(headers))?;

        let mut multipart = multipart.map_err(|e| {
            AppError::BadRequest(format!("Invalid multipart request: {}", e.body_text()))
        })?;

        let staged = self.receive(kind, flow, &mut multipart).await?;
        let placed = classify_and_place(flow, &staged, video.id).await;
        release(staged);
        let placed = placed?;

        enter(UploadStage::Persisting);
        video.set_reference(kind, placed.reference);
        let video = self.state.videos.update_video(&video).await?;

        enter(UploadStage::Done);
        tracing::info!(
            video_id = %video.id,
            backend = %flow.placement.backend(),
            storage_key = placed.storage_key.as_deref().unwrap_or("-"),
            "Upload completed"
        );

        Ok(video)
    }

    /// Find the part carrying the file, check its type and stage it.
    async fn receive(
        &self,
        kind: MediaKind,
        flow: &UploadFlow,
        multipart: &mut Multipart,
    ) -> Result<StagedFile, HttpAppError> {
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(kind.field_name()) {
                continue;
            }
            // A plain form value under the file's name is not an upload
            if field.file_name().is_none() {
                return Err(missing_file(kind).into());
            }

            let media_type = flow.validator.validate_content_type(field.content_type())?;

            enter(UploadStage::Staging);
            let staged = self
                .state
                .staging
                .stage(field, &media_type, flow.validator.max_file_size())
                .await?;

            return Ok(staged);
        }

        Err(missing_file(kind).into())
    }
}

async fn classify_and_place(
    flow: &UploadFlow,
    staged: &StagedFile,
    media_id: Uuid,
) -> Result<PlacementResult, HttpAppError> {
    let orientation = match flow.placement.classifier() {
        Some(classifier) => {
            enter(UploadStage::Classifying);
            let orientation = classifier.classify(staged.path()).await?;
            tracing::info!(orientation = %orientation, "Upload classified");
            Some(orientation)
        }
        None => None,
    };

    enter(UploadStage::Placing);
    let placed = flow
        .placement
        .place(staged, staged.content_type(), media_id, orientation)
        .await?;
    Ok(placed)
}

fn release(staged: StagedFile) {
    let path = staged.path().to_path_buf();
    if let Err(e) = staged.release() {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove staged upload");
    }
}
