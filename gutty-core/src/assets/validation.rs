//! Filename and content checks for uploaded images.

use std::path::Path;

use crate::error::UploadRejection;

/// Extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Why a byte prefix was not recognised as an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Too short to contain any supported header
    TooSmall,
    UnrecognizedFormat,
}

/// Lowercased extension of `filename` if it is on the allow-list.
pub fn allowed_extension(filename: &str) -> Result<String, UploadRejection> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return Err(UploadRejection::EmptyFilename);
    }

    let extension = Path::new(trimmed)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else if extension.is_empty() {
        Err(UploadRejection::DisallowedExtension(trimmed.to_string()))
    } else {
        Err(UploadRejection::DisallowedExtension(extension))
    }
}

/// True for names the store itself could have produced: one path
/// component, not hidden, with an allowed extension.
pub fn is_servable_name(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains(['/', '\\', '\0'])
        && filename != ".."
        && allowed_extension(filename).is_ok()
}

pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Detect the image format from its leading bytes.
pub fn validate_magic_bytes(data: &[u8]) -> Result<&'static str, InvalidReason> {
    if data.len() < 4 {
        return Err(InvalidReason::TooSmall);
    }

    // JPEG: FF D8 FF
    if data[0..3] == [0xFF, 0xD8, 0xFF] {
        return Ok("image/jpeg");
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.len() >= 8
        && data[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    {
        return Ok("image/png");
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return Ok("image/webp");
    }

    // GIF87a / GIF89a
    if data.len() >= 6 && &data[0..3] == b"GIF" {
        return Ok("image/gif");
    }

    Err(InvalidReason::UnrecognizedFormat)
}
