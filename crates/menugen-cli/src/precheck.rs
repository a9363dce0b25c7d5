use anyhow::{Context, Result};
use menugen_shared::{UploadPolicy, UploadRejection};
use std::path::Path;

/// A menu photo that passed the same policy the gateway enforces.
#[derive(Debug)]
pub struct PreparedUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Check type and size before reading the file, then load it.
pub fn prepare_upload(path: &Path, policy: &UploadPolicy) -> Result<PreparedUpload> {
    let content_type = mime_guess::from_path(path)
        .first_raw()
        .ok_or_else(|| UploadRejection::UnsupportedType(String::new()))?;
    policy.check_type(content_type)?;

    let size = std::fs::metadata(path)
        .with_context(|| format!("Cannot read {}", path.display()))?
        .len();
    policy.check_size(usize::try_from(size).unwrap_or(usize::MAX))?;

    let bytes = std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "menu".to_string());

    Ok(PreparedUpload {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}
