//! Storage key generation.
//!
//! A key is 32 bytes from the thread-local CSPRNG, base64url encoded without
//! padding, followed by an extension derived from the MIME type. The key is
//! the only thing protecting a stored object from being fetched by others, so
//! it must never be derived from anything guessable.

use base64::Engine;
use rand::RngCore;
use thiserror::Error;

const KEY_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported media type: {media_type} (allowed: {allowed:?})")]
pub struct UnsupportedMediaType {
    pub media_type: String,
    pub allowed: Vec<String>,
}

/// File extension (with leading dot) for a supported MIME type.
pub fn extension_for(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/png" => Some(".png"),
        "image/jpeg" => Some(".jpg"),
        "video/mp4" => Some(".mp4"),
        _ => None,
    }
}

/// Generate a fresh, unguessable filename for `media_type`.
///
/// `allowed` is the allow-list of the calling flow; a type outside it is
/// rejected even if an extension mapping exists for it.
pub fn new_key(media_type: &str, allowed: &[&str]) -> Result<String, UnsupportedMediaType> {
    let unsupported = || UnsupportedMediaType {
        media_type: media_type.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    };

    if !allowed.contains(&media_type) {
        return Err(unsupported());
    }
    let ext = extension_for(media_type).ok_or_else(unsupported)?;

    let mut bytes = [0u8; KEY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);

    Ok(format!("{}{}", token, ext))
}
