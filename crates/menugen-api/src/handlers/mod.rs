pub mod auth;
pub mod health;
pub mod menu;

use axum::http::Uri;

use crate::utils::error::ApiError;

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
