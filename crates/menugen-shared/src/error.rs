//! Application error types

use thiserror::Error;

/// Reasons an upload fails the shared policy. The display strings are the
/// messages shown to the user on both sides.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Invalid file type. Only PNG, JPG, and GIF are allowed.")]
    UnsupportedType(String),

    #[error("File size too large. Maximum size is {limit}.")]
    TooLarge { size: usize, limit: String },
}
