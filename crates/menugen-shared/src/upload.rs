//! Upload policy shared by the gateway and the client.

use serde::{Deserialize, Serialize};

use crate::constants::{ALLOWED_IMAGE_TYPES, MAX_UPLOAD_BYTES};
use crate::error::UploadRejection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            allowed_types: ALLOWED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    /// Accepts `image/png`, `IMAGE/PNG; charset=x`, etc.
    pub fn check_type(&self, content_type: &str) -> Result<(), UploadRejection> {
        let essence = essence(content_type);
        if self
            .allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&essence))
        {
            Ok(())
        } else {
            Err(UploadRejection::UnsupportedType(essence))
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), UploadRejection> {
        if size > self.max_bytes {
            Err(self.too_large(size))
        } else {
            Ok(())
        }
    }

    pub fn check(&self, content_type: &str, size: usize) -> Result<(), UploadRejection> {
        self.check_type(content_type)?;
        self.check_size(size)
    }

    pub fn too_large(&self, size: usize) -> UploadRejection {
        UploadRejection::TooLarge {
            size,
            limit: human_size(self.max_bytes),
        }
    }
}

/// `10MB`, `1.5MB`, `512KB`, `900 bytes`. Never rounds a limit down to zero.
fn human_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;

    match bytes {
        b if b >= MIB && b % MIB == 0 => format!("{}MB", b / MIB),
        b if b >= MIB => format!("{:.1}MB", b as f64 / MIB as f64),
        b if b >= KIB && b % KIB == 0 => format!("{}KB", b / KIB),
        b if b >= KIB => format!("{:.1}KB", b as f64 / KIB as f64),
        b => format!("{} bytes", b),
    }
}

fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_accepts_menu_images() {
        let policy = UploadPolicy::default();
        for ty in ["image/png", "image/jpeg", "image/jpg", "image/gif", "IMAGE/PNG"] {
            assert!(policy.check_type(ty).is_ok(), "{} should be accepted", ty);
        }
        assert!(policy.check_type("image/png; name=menu.png").is_ok());
    }

    #[test]
    fn test_default_policy_rejects_other_types() {
        let policy = UploadPolicy::default();
        assert_eq!(
            policy.check_type("application/pdf"),
            Err(UploadRejection::UnsupportedType("application/pdf".to_string()))
        );
        assert!(policy.check_type("image/webp").is_err());
        assert!(policy.check_type("").is_err());
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        let policy = UploadPolicy::default();
        assert!(policy.check_size(MAX_UPLOAD_BYTES).is_ok());

        let err = policy.check_size(MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(err.to_string(), "File size too large. Maximum size is 10MB.");
    }

    #[test]
    fn test_size_message_for_small_limits() {
        let policy = UploadPolicy {
            max_bytes: 512 * 1024,
            ..UploadPolicy::default()
        };
        let err = policy.check_size(600 * 1024).unwrap_err();
        assert_eq!(err.to_string(), "File size too large. Maximum size is 512KB.");

        assert_eq!(human_size(3 * 1024 * 1024 / 2), "1.5MB");
        assert_eq!(human_size(1536), "1.5KB");
        assert_eq!(human_size(900), "900 bytes");
    }

    #[test]
    fn test_check_reports_type_before_size() {
        let policy = UploadPolicy::default();
        let err = policy.check("application/pdf", MAX_UPLOAD_BYTES * 2).unwrap_err();
        assert!(matches!(err, UploadRejection::UnsupportedType(_)));
    }
}
