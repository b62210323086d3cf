//! Domain models

pub mod media;
pub mod video;

pub use media::{MediaKind, Orientation};
pub use video::{Video, VideoResponse};
