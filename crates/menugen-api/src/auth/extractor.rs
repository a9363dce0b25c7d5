use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use menugen_shared::Identity;
use std::convert::Infallible;
use std::sync::Arc;

use super::strategy::AuthStrategy;

/// Identity of the caller, resolved once per request by the configured
/// strategy. `None` means anonymous; handlers decide what that implies.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    Arc<dyn AuthStrategy>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let strategy = Arc::<dyn AuthStrategy>::from_ref(state);
        Ok(CurrentIdentity(strategy.current_identity(&parts.headers)))
    }
}
