use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;

/// Menu photo as received from the client, already checked against the
/// upload policy.
#[derive(Debug, Clone)]
pub struct MenuImage {
    pub content_type: String,
    pub bytes: Bytes,
}

impl MenuImage {
    pub fn new(content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    /// `data:<mime>;base64,<payload>` for inline image input.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}
