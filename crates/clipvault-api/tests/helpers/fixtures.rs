use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;

/// 1x1 transparent PNG.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Bytes shaped like the start of an mp4; the fake probe never reads them.
pub fn create_fake_mp4(len: usize) -> Vec<u8> {
    let mut data = b"\x00\x00\x00\x20ftypisom\x00\x00\x02\x00isomiso2avc1mp41".to_vec();
    data.resize(len.max(data.len()), 0x42);
    data
}

pub fn file_form(field: &str, file_name: &str, mime: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(Bytes::from(data))
        .file_name(file_name)
        .mime_type(mime);
    MultipartForm::new().add_part(field, part)
}

pub fn thumbnail_form(data: Vec<u8>) -> MultipartForm {
    file_form("thumbnail", "thumb.png", "image/png", data)
}

pub fn video_form(data: Vec<u8>) -> MultipartForm {
    file_form("video", "clip.mp4", "video/mp4", data)
}
