use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The two kinds of upload a video record accepts.
///
/// Each kind has its own multipart field, MIME allow-list and reference field
/// on [`Video`](crate::models::Video).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Thumbnail,
    Video,
}

const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg"];
const VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4"];

impl MediaKind {
    /// Name of the multipart field carrying the file.
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaKind::Thumbnail => "thumbnail",
            MediaKind::Video => "video",
        }
    }

    /// MIME types accepted for this kind. Image and video sets never overlap.
    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Thumbnail => THUMBNAIL_CONTENT_TYPES,
            MediaKind::Video => VIDEO_CONTENT_TYPES,
        }
    }

    pub fn allows(&self, content_type: &str) -> bool {
        self.allowed_content_types().contains(&content_type)
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaKind::Thumbnail => write!(f, "thumbnail"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Coarse orientation derived from probed width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Exact 16:9 test with integer floor division.
    ///
    /// `width == floor(16 * height / 9)` is landscape, otherwise
    /// `height == floor(16 * width / 9)` is portrait, anything else is other.
    /// Near-16:9 media that misses the equality is `Other`. A side too large
    /// to scale never matches.
    pub fn from_dimensions(width: u64, height: u64) -> Self {
        let scaled = |side: u64| side.checked_mul(16).map(|v| v / 9);

        if scaled(height) == Some(width) {
            Orientation::Landscape
        } else if scaled(width) == Some(height) {
            Orientation::Portrait
        } else {
            Orientation::Other
        }
    }

    /// Object-store key prefix for media of this orientation.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key_prefix())
    }
}
