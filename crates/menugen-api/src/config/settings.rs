use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use menugen_shared::telemetry::LogSettings;
use menugen_shared::UploadPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    /// Fixed to the shared policy so the client pre-check and the gateway
    /// always agree; not read from any config source.
    #[serde(skip)]
    pub upload: UploadPolicy,
    pub openai: OpenAiConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LogSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub frontend_url: String,
    /// Regexes matched against the full `Origin` value.
    pub allowed_origin_patterns: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub vision_model: String,
    pub image_model: String,
    pub image_size: String,
    pub image_quality: String,
    /// Unset means the HTTP client's default (no timeout).
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Identity comes from headers injected by the fronting proxy.
    TrustedHeaders,
    /// Fixed developer identity, for local runs.
    Mock,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    /// Reject `POST /api/process-menu` without an identity.
    pub enforce: bool,
    pub require_bearer: bool,
    pub headers: IdentityHeaders,
    pub sign_in_url: String,
    pub sign_out_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdentityHeaders {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub username: String,
}

impl Settings {
    /// Defaults, then `config/settings.toml`, then `APP__*` variables, then
    /// the bare `PORT` / `FRONTEND_URL` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self::defaults_builder()?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(Self::environment())
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("cors.frontend_url", std::env::var("FRONTEND_URL").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Built-in defaults only; no file or environment lookup.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::defaults_builder()?.build()?.try_deserialize()
    }

    /// `APP__SECTION__KEY` variables. List values are comma separated, so
    /// origin patterns must not contain commas.
    fn environment() -> Environment {
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("cors.allowed_origin_patterns")
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5001)?
            .set_default("cors.frontend_url", "http://localhost:3000")?
            .set_default(
                "cors.allowed_origin_patterns",
                vec![
                    r"^https://.*\.choreoapis\.dev$".to_string(),
                    r"^https://.*\.choreo\.dev$".to_string(),
                ],
            )?
            .set_default("openai.base_url", "https://api.openai.com/v1")?
            .set_default("openai.vision_model", "gpt-4.1-mini")?
            .set_default("openai.image_model", "dall-e-3")?
            .set_default("openai.image_size", "1024x1024")?
            .set_default("openai.image_quality", "standard")?
            .set_default("auth.mode", "trusted_headers")?
            .set_default("auth.enforce", false)?
            .set_default("auth.require_bearer", true)?
            .set_default("auth.headers.user_id", "x-user-id")?
            .set_default("auth.headers.email", "x-user-email")?
            .set_default("auth.headers.name", "x-user-name")?
            .set_default("auth.headers.username", "x-username")?
            .set_default("auth.sign_in_url", "/auth/login")?
            .set_default("auth.sign_out_url", "/auth/logout")?
            .set_default("logging.format", "pretty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_upload_policy() {
        let settings = Settings::defaults().unwrap();
        assert_eq!(settings.upload, UploadPolicy::default());
    }

    #[test]
    fn test_upload_policy_ignores_config_sources() {
        let settings: Settings = Settings::defaults_builder()
            .unwrap()
            .set_override("upload.max_bytes", 1)
            .unwrap()
            .set_override("upload.allowed_types", vec!["application/pdf".to_string()])
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.upload, UploadPolicy::default());
    }

    #[test]
    fn test_environment_overrides_and_lists() {
        let vars: config::Map<String, String> = [
            ("APP__SERVER__PORT", "8080"),
            ("APP__CORS__ALLOWED_ORIGIN_PATTERNS", r"^https://a\.test$,^https://b\.test$"),
            ("APP__AUTH__MODE", "mock"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let settings: Settings = Settings::defaults_builder()
            .unwrap()
            .add_source(Settings::environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(
            settings.cors.allowed_origin_patterns,
            vec![r"^https://a\.test$".to_string(), r"^https://b\.test$".to_string()]
        );
        assert_eq!(settings.auth.mode, AuthMode::Mock);
        assert_eq!(settings.cors.frontend_url, "http://localhost:3000");
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::defaults().unwrap();
        assert_eq!(settings.server.port, 5001);
        assert_eq!(settings.cors.frontend_url, "http://localhost:3000");
        assert_eq!(settings.cors.allowed_origin_patterns.len(), 2);
        assert_eq!(settings.openai.vision_model, "gpt-4.1-mini");
        assert_eq!(settings.openai.image_model, "dall-e-3");
        assert_eq!(settings.openai.timeout_seconds, None);
        assert_eq!(settings.auth.mode, AuthMode::TrustedHeaders);
        assert!(!settings.auth.enforce);
    }
}
