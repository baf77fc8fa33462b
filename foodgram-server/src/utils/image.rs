//! Recipe image storage
//!
//! Recipes accept an image either as a `data:image/...;base64,...` string embedded
//! in the JSON payload or as a media path returned by the multipart upload
//! endpoint. Decoded images are validated, re-encoded to JPEG and stored under
//! `MEDIA_DIR/recipes/`.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use uuid::Uuid;

use crate::utils::AppError;

/// Maximum decoded file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored dish images
const JPEG_QUALITY: u8 = 85;

/// URL prefix under which the media directory is served
pub const MEDIA_URL: &str = "/media";

/// Split a `data:image/<fmt>;base64,<payload>` string into format and payload
fn parse_data_uri(value: &str) -> Option<(&str, &str)> {
    let rest = value.strip_prefix("data:image/")?;
    let (format, payload) = rest.split_once(";base64,")?;
    Some((format, payload))
}

/// True if the value looks like a data-URI embedded image
pub fn is_data_uri(value: &str) -> bool {
    parse_data_uri(value).is_some()
}

/// Image format guessed from a filename (`photo.JPG` -> `jpeg`);
/// `None` for non-image or unknown extensions
pub fn format_from_filename(name: &str) -> Option<String> {
    mime_guess::from_path(name)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .map(|m| m.subtype().as_str().to_string())
}

/// Validate raw image bytes (size limit + really decodable as an image)
fn validate_image(data: &[u8], format: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(
            "image",
            format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            ),
        ));
    }
    if !SUPPORTED_FORMATS.contains(&format.to_ascii_lowercase().as_str()) {
        return Err(AppError::validation(
            "image",
            format!("Unsupported image format: {}", format),
        ));
    }
    Ok(())
}

/// Re-encode image bytes to JPEG with the configured quality
fn compress_to_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation("image", format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }
    Ok(buffer)
}

/// Store raw image bytes under `<media_dir>/recipes/` and return the media URL
pub fn store_image_bytes(media_dir: &Path, data: &[u8], format: &str) -> Result<String, AppError> {
    validate_image(data, format)?;
    let jpeg = compress_to_jpeg(data)?;

    let recipes_dir = media_dir.join("recipes");
    fs::create_dir_all(&recipes_dir)
        .map_err(|e| AppError::internal(format!("Failed to create media dir: {}", e)))?;

    let filename = format!("{}.jpg", Uuid::new_v4());
    fs::write(recipes_dir.join(&filename), jpeg)
        .map_err(|e| AppError::internal(format!("Failed to write image: {}", e)))?;

    Ok(format!("{}/recipes/{}", MEDIA_URL, filename))
}

/// Decode a data-URI image and store it, returning the media URL
pub fn store_data_uri(media_dir: &Path, value: &str) -> Result<String, AppError> {
    let (format, payload) = parse_data_uri(value)
        .ok_or_else(|| AppError::validation("image", "Expected a data:image/...;base64,... value"))?;

    let data = BASE64
        .decode(payload.trim())
        .map_err(|e| AppError::validation("image", format!("Invalid base64 image data: {}", e)))?;

    store_image_bytes(media_dir, &data, format)
}

/// Resolve the `image` field of a recipe payload to a stored media URL.
///
/// Data URIs are decoded and stored; values already pointing into the media dir
/// (a previous upload) pass through unchanged.
pub fn resolve_image_field(media_dir: &Path, value: &str) -> Result<String, AppError> {
    if is_data_uri(value) {
        store_data_uri(media_dir, value)
    } else if value.starts_with(&format!("{}/", MEDIA_URL)) {
        Ok(value.to_string())
    } else {
        Err(AppError::validation(
            "image",
            "Expected a data-URI image or a media path from the upload endpoint",
        ))
    }
}
