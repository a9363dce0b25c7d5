use axum::http::{request::Parts, HeaderValue, Method};
use regex::Regex;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::debug;

use crate::config::CorsConfig;

/// Exact frontend origin plus regex-matched platform domains.
#[derive(Debug, Clone)]
pub struct OriginMatcher {
    frontend_url: String,
    patterns: Vec<Regex>,
}

impl OriginMatcher {
    pub fn new(config: &CorsConfig) -> Result<Self, regex::Error> {
        let patterns = config
            .allowed_origin_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            frontend_url: config.frontend_url.trim_end_matches('/').to_string(),
            patterns,
        })
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        let allowed = origin == self.frontend_url || self.patterns.iter().any(|p| p.is_match(origin));
        if !allowed {
            debug!("CORS origin rejected: {}", origin);
        }
        allowed
    }
}

pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, regex::Error> {
    let matcher = Arc::new(OriginMatcher::new(config)?);

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| matcher.is_allowed(o))
                    .unwrap_or(false)
            },
        ))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn matcher() -> OriginMatcher {
        OriginMatcher::new(&Settings::defaults().unwrap().cors).unwrap()
    }

    #[test]
    fn test_frontend_origin_allowed() {
        assert!(matcher().is_allowed("http://localhost:3000"));
        assert!(!matcher().is_allowed("http://localhost:3001"));
    }

    #[test]
    fn test_platform_domains_allowed() {
        let m = matcher();
        assert!(m.is_allowed("https://menugen-abc.e1-us-east-azure.choreoapis.dev"));
        assert!(m.is_allowed("https://app.choreo.dev"));
        assert!(!m.is_allowed("http://app.choreo.dev"));
        assert!(!m.is_allowed("https://choreo.dev.evil.com"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let mut config = Settings::defaults().unwrap().cors;
        config.allowed_origin_patterns = vec!["(".to_string()];
        assert!(OriginMatcher::new(&config).is_err());
    }
}
