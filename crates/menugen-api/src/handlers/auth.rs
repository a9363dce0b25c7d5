use axum::{extract::State, response::Redirect, Json};
use menugen_shared::Identity;
use std::sync::Arc;

use crate::auth::{AuthStrategy, CurrentIdentity};
use crate::utils::error::ApiError;

/// GET /api/auth/user
pub async fn current_user(CurrentIdentity(identity): CurrentIdentity) -> Result<Json<Identity>, ApiError> {
    identity
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

/// GET /api/auth/login
pub async fn sign_in(State(strategy): State<Arc<dyn AuthStrategy>>) -> Redirect {
    Redirect::to(strategy.sign_in())
}

/// GET /api/auth/logout
pub async fn sign_out(State(strategy): State<Arc<dyn AuthStrategy>>) -> Redirect {
    Redirect::to(strategy.sign_out())
}
