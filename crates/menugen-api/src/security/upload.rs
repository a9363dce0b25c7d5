use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use bytes::BytesMut;
use menugen_shared::{UploadPolicy, UploadRejection};
use tracing::debug;

use crate::models::MenuImage;
use crate::utils::error::ApiError;

pub const NO_IMAGE: &str = "No image file provided";

/// Read the `image` part, enforcing the upload policy while streaming so an
/// oversized or mistyped file is refused before it is fully buffered.
pub async fn read_image_field(mut field: Field<'_>, policy: &UploadPolicy) -> Result<MenuImage, ApiError> {
    let declared = field.content_type().map(str::to_string);
    let filename = field.file_name().map(str::to_string);

    if let Some(declared) = declared.as_deref().filter(|t| !is_generic(t)) {
        policy.check_type(declared)?;
    }

    let mut buffer = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| stream_error(e, policy, buffer.len()))?
    {
        if buffer.len() + chunk.len() > policy.max_bytes {
            return Err(policy.too_large(buffer.len() + chunk.len()).into());
        }
        buffer.extend_from_slice(&chunk);
    }
    let bytes = buffer.freeze();

    // Browsers send an empty part when no file was picked.
    if bytes.is_empty() {
        return Err(ApiError::BadRequest(NO_IMAGE.to_string()));
    }

    let content_type = resolve_content_type(declared.as_deref(), filename.as_deref()).ok_or_else(|| {
        UploadRejection::UnsupportedType(declared.clone().unwrap_or_default())
    })?;
    policy.check(&content_type, bytes.len())?;

    debug!(
        "Accepted upload {:?}: {} bytes of {}",
        filename,
        bytes.len(),
        content_type
    );

    Ok(MenuImage::new(content_type, bytes))
}

/// The declared type when it is specific; otherwise guess from the file name.
pub fn resolve_content_type(declared: Option<&str>, filename: Option<&str>) -> Option<String> {
    let resolved = match declared.filter(|t| !is_generic(t)) {
        Some(declared) => declared.split(';').next().unwrap_or_default().trim().to_ascii_lowercase(),
        None => mime_guess::from_path(filename?).first_raw()?.to_string(),
    };

    // `image/jpg` is accepted on input but is not a registered type.
    if resolved == "image/jpg" {
        Some("image/jpeg".to_string())
    } else {
        Some(resolved)
    }
}

fn is_generic(content_type: &str) -> bool {
    let content_type = content_type.trim();
    content_type.is_empty() || content_type.eq_ignore_ascii_case("application/octet-stream")
}

/// A body-limit overflow surfaces as a stream error; report it as the same
/// size rejection the policy would give.
pub fn stream_error(error: MultipartError, policy: &UploadPolicy, read: usize) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        policy.too_large(read.max(policy.max_bytes + 1)).into()
    } else {
        ApiError::BadRequest(format!("Failed to read upload: {}", error.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_wins() {
        assert_eq!(
            resolve_content_type(Some("image/gif"), Some("menu.png")).as_deref(),
            Some("image/gif")
        );
        assert_eq!(
            resolve_content_type(Some("Image/PNG; foo=bar"), None).as_deref(),
            Some("image/png")
        );
    }

    #[test]
    fn test_jpg_alias_is_normalized() {
        assert_eq!(
            resolve_content_type(Some("image/jpg"), None).as_deref(),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_generic_type_is_guessed_from_file_name() {
        assert_eq!(
            resolve_content_type(Some("application/octet-stream"), Some("menu.png")).as_deref(),
            Some("image/png")
        );
        assert_eq!(
            resolve_content_type(None, Some("MENU.JPG")).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            resolve_content_type(None, Some("menu.pdf")).as_deref(),
            Some("application/pdf")
        );
        assert_eq!(resolve_content_type(None, Some("menu")), None);
        assert_eq!(resolve_content_type(Some(""), None), None);
    }
}
