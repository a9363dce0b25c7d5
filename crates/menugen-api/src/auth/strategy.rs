use axum::http::{header, HeaderMap};
use menugen_shared::constants::{DEV_USERNAME, DEV_USER_EMAIL, DEV_USER_ID, DEV_USER_NAME};
use menugen_shared::utils::mask_email;
use menugen_shared::Identity;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{AuthConfig, AuthMode, IdentityHeaders};

/// Sign-in capability. Implementations are alternatives, never combined.
pub trait AuthStrategy: Send + Sync {
    /// Where to send the browser to sign in.
    fn sign_in(&self) -> &str;

    /// Where to send the browser to sign out.
    fn sign_out(&self) -> &str;

    fn current_identity(&self, headers: &HeaderMap) -> Option<Identity>;
}

pub fn strategy_from_config(config: &AuthConfig) -> Arc<dyn AuthStrategy> {
    match config.mode {
        AuthMode::TrustedHeaders => {
            info!(
                "Auth: trusted proxy headers (bearer required: {}, enforce: {})",
                config.require_bearer, config.enforce
            );
            Arc::new(TrustedHeaderAuth::new(config))
        }
        AuthMode::Mock => {
            warn!("Auth: mock identity enabled, every request is signed in as {}", DEV_USER_ID);
            Arc::new(MockIdentityAuth::default())
        }
    }
}

/// Reads the identity the fronting proxy injected after it validated the
/// session. Only safe behind that proxy.
#[derive(Debug, Clone)]
pub struct TrustedHeaderAuth {
    headers: IdentityHeaders,
    require_bearer: bool,
    sign_in_url: String,
    sign_out_url: String,
}

impl TrustedHeaderAuth {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            headers: config.headers.clone(),
            require_bearer: config.require_bearer,
            sign_in_url: config.sign_in_url.clone(),
            sign_out_url: config.sign_out_url.clone(),
        }
    }
}

impl AuthStrategy for TrustedHeaderAuth {
    fn sign_in(&self) -> &str {
        &self.sign_in_url
    }

    fn sign_out(&self) -> &str {
        &self.sign_out_url
    }

    fn current_identity(&self, headers: &HeaderMap) -> Option<Identity> {
        if self.require_bearer && bearer_token(headers).is_none() {
            debug!("No bearer credential on request");
            return None;
        }

        let id = header_value(headers, &self.headers.user_id)?;
        let email = header_value(headers, &self.headers.email);
        let name = header_value(headers, &self.headers.name);
        let username = header_value(headers, &self.headers.username)
            .or_else(|| email.clone())
            .unwrap_or_else(|| id.clone());

        debug!(
            "Identity resolved: id={}, email={}",
            id,
            email.as_deref().map(mask_email).unwrap_or_default()
        );

        Some(Identity {
            id,
            email,
            name,
            username,
        })
    }
}

/// Development stand-in: everyone is the same fixed user.
#[derive(Debug, Clone)]
pub struct MockIdentityAuth {
    identity: Identity,
}

impl Default for MockIdentityAuth {
    fn default() -> Self {
        Self {
            identity: Identity {
                id: DEV_USER_ID.to_string(),
                email: Some(DEV_USER_EMAIL.to_string()),
                name: Some(DEV_USER_NAME.to_string()),
                username: DEV_USERNAME.to_string(),
            },
        }
    }
}

impl AuthStrategy for MockIdentityAuth {
    fn sign_in(&self) -> &str {
        "/"
    }

    fn sign_out(&self) -> &str {
        "/"
    }

    fn current_identity(&self, _headers: &HeaderMap) -> Option<Identity> {
        Some(self.identity.clone())
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
