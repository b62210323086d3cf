use clipvault_core::models::MediaKind;

/// Room for multipart boundaries and part headers on top of the file itself
/// when comparing against a request's declared `Content-Length`.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Request-level validation errors for uploads
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Missing Content-Type for {0}")]
    MissingContentType(MediaKind),

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },
}

/// Checks made before any byte of an upload is written.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    kind: MediaKind,
    max_file_size: u64,
}

impl UploadValidator {
    pub fn new(kind: MediaKind, max_file_size: u64) -> Self {
        Self {
            kind,
            max_file_size,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Reject requests whose declared body length cannot fit the ceiling.
    ///
    /// The declared length covers the whole multipart body, so a fixed
    /// allowance is added. A missing length passes; staging enforces the
    /// ceiling on the bytes actually received.
    pub fn validate_declared_length(&self, declared: Option<u64>) -> Result<(), ValidationError> {
        match declared {
            Some(size) if size > self.max_file_size.saturating_add(MULTIPART_OVERHEAD_BYTES) => {
                Err(ValidationError::FileTooLarge {
                    size,
                    max: self.max_file_size,
                })
            }
            _ => Ok(()),
        }
    }

    /// Validate the part's content type, returning it normalized.
    pub fn validate_content_type(
        &self,
        content_type: Option<&str>,
    ) -> Result<String, ValidationError> {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .ok_or(ValidationError::MissingContentType(self.kind))?;

        let normalized = content_type.to_lowercase();

        if !self.kind.allows(&normalized) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self
                    .kind
                    .allowed_content_types()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            });
        }

        Ok(normalized)
    }
}
