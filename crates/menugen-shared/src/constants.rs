//! Application-wide constants

/// Upload ceiling enforced by both the gateway and the client (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/gif"];

/// Multipart field carrying the menu photo.
pub const FIELD_IMAGE: &str = "image";

/// Multipart field carrying the caller's OpenAI key.
pub const FIELD_OPENAI_KEY: &str = "openaiKey";

pub const DEFAULT_API_URL: &str = "http://localhost:5001";

pub const DEV_USER_ID: &str = "dev-user-123";
pub const DEV_USERNAME: &str = "developer";
pub const DEV_USER_EMAIL: &str = "developer@example.com";
pub const DEV_USER_NAME: &str = "Developer User";
