//! Image ingestion: turns an uploaded file into a ready-to-inline `ImageHandle`.
//!
//! The handle is a `data:` URI so the exported artifact stays valid wherever it is
//! moved. No decoding happens here; only the declared type is checked.

use axum::extract::Multipart;
use base64::Engine;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::slider::ImageHandle;

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

const EXTENSION_MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

/// Resolves the media type of an upload: the declared content type if it is an image
/// type, otherwise a guess from the file extension.
pub fn resolve_media_type(content_type: Option<&str>, file_name: Option<&str>) -> Option<String> {
    let declared = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/") && ct.len() > "image/".len());
    if declared.is_some() {
        return declared;
    }

    let extension = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
    EXTENSION_MEDIA_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, media_type)| media_type.to_string())
}

/// Encodes raw bytes as a base64 `data:` URI handle.
pub fn to_data_uri(media_type: &str, bytes: &[u8]) -> ImageHandle {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    ImageHandle::new(format!("data:{media_type};base64,{payload}"))
}

/// Validates one uploaded file and converts it into a handle.
pub fn ingest_bytes(
    content_type: Option<&str>,
    file_name: Option<&str>,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<ImageHandle, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Image is {} bytes; the limit is {max_bytes}",
            bytes.len()
        )));
    }
    let media_type = resolve_media_type(content_type, file_name).ok_or_else(|| {
        warn!(?content_type, ?file_name, "Rejected non-image upload");
        AppError::Validation("Uploaded file is not an image".to_string())
    })?;

    debug!(%media_type, bytes = bytes.len(), "Image ingested");
    Ok(to_data_uri(&media_type, bytes))
}

/// Reads the `file` field from a multipart body. Other fields are skipped.
pub async fn ingest_multipart(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<ImageHandle, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        return ingest_bytes(
            content_type.as_deref(),
            file_name.as_deref(),
            &bytes,
            max_bytes,
        );
    }
    Err(AppError::Validation(format!(
        "Multipart body has no '{UPLOAD_FIELD}' field"
    )))
}
