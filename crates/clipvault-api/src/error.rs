//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Domain errors from the storage
//! and processing crates convert into it with `?`, so every failure renders
//! the same `{"error", "code"}` envelope and is logged once.
//!
//! The rendered body never carries `details`. The full envelope rides along as
//! a response extension, and the error details middleware puts `details` back
//! when the configured environment is not production.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clipvault_core::{AppError, ErrorMetadata, LogLevel};
use clipvault_processing::{PlacementError, ProbeError, ValidationError};
use clipvault_storage::{StagingError, StorageError};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: AppError lives in clipvault-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error.detailed_message(), error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error.detailed_message(), error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error.detailed_message(), error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let envelope = ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
            details: (!app_error.is_sensitive()).then(|| app_error.detailed_message()),
        };
        let body = ErrorResponse {
            details: None,
            ..envelope.clone()
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(envelope);
        response
    }
}

// Convert domain errors to HttpAppError

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::InvalidKey(msg) => AppError::BadRequest(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            StorageError::IoError(err) => AppError::Storage(format!("IO error: {}", err)),
            other => AppError::Storage(other.to_string()),
        };
        HttpAppError(app)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::FileTooLarge { size, max } => AppError::BadRequest(format!(
                "Upload of {} bytes exceeds the maximum allowed size of {} bytes",
                size, max
            )),
            ValidationError::MissingContentType(kind) => {
                AppError::BadRequest(format!("Missing Content-Type for {}", kind))
            }
            ValidationError::InvalidContentType {
                content_type,
                allowed,
            } => AppError::BadRequest(format!(
                "Invalid content type '{}', allowed: {}",
                content_type,
                allowed.join(", ")
            )),
        };
        HttpAppError(app)
    }
}

impl From<StagingError> for HttpAppError {
    fn from(err: StagingError) -> Self {
        let app = match err {
            StagingError::TooLarge { limit } => AppError::BadRequest(format!(
                "File exceeds the maximum allowed size of {} bytes",
                limit
            )),
            StagingError::Empty => AppError::BadRequest("Uploaded file is empty".to_string()),
            StagingError::Read(msg) => {
                AppError::BadRequest(format!("Failed to read upload: {}", msg))
            }
            StagingError::Io(err) => AppError::Internal(format!("Failed to stage upload: {}", err)),
        };
        HttpAppError(app)
    }
}

impl From<ProbeError> for HttpAppError {
    fn from(err: ProbeError) -> Self {
        HttpAppError(AppError::ExternalTool(err.to_string()))
    }
}

impl From<PlacementError> for HttpAppError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::Probe(probe) => probe.into(),
            PlacementError::UnsupportedMediaType(e) => HttpAppError(AppError::BadRequest(e.to_string())),
            PlacementError::Read(e) => {
                HttpAppError(AppError::Storage(format!("Failed to read staged upload: {}", e)))
            }
            PlacementError::Upload(e) => HttpAppError(AppError::Storage(e.to_string())),
        }
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError(AppError::BadRequest(format!(
            "Failed to read multipart body: {}",
            err.body_text()
        )))
    }
}
