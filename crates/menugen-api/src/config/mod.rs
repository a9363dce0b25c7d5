pub mod settings;

pub use settings::{AuthConfig, AuthMode, CorsConfig, IdentityHeaders, OpenAiConfig, ServerConfig, Settings};
