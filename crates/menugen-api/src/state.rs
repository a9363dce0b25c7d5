use axum::extract::FromRef;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{strategy_from_config, AuthStrategy};
use crate::config::Settings;

/// Application state shared across handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Connection pool for outbound OpenAI calls; carries no credentials.
    pub http: Client,
    pub auth: Arc<dyn AuthStrategy>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.openai.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            auth: strategy_from_config(&settings.auth),
            settings: Arc::new(settings),
        })
    }

    /// Replace the auth strategy, e.g. with a fixed one in tests.
    pub fn with_auth(mut self, auth: Arc<dyn AuthStrategy>) -> Self {
        self.auth = auth;
        self
    }
}

impl FromRef<AppState> for Arc<dyn AuthStrategy> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}
