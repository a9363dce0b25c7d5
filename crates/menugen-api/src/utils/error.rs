use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use menugen_shared::{ErrorBody, UploadRejection};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Vision output had no usable JSON array.
    #[error("Menu parse error: {0}")]
    MenuParse(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<UploadRejection> for ApiError {
    fn from(rejection: UploadRejection) -> Self {
        ApiError::BadRequest(rejection.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None)
            }
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, msg, None)
            }
            ApiError::NotFound(path) => {
                tracing::warn!("Not found: {}", path);
                (StatusCode::NOT_FOUND, "Endpoint not found".to_string(), None)
            }
            ApiError::MenuParse(msg) => {
                tracing::error!("Error parsing menu analysis: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse menu analysis".to_string(),
                    None,
                )
            }
            ApiError::Upstream(msg) => {
                tracing::error!("Error processing menu: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process menu".to_string(),
                    Some(msg),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}
