pub mod extractor;
pub mod strategy;

pub use extractor::CurrentIdentity;
pub use strategy::{strategy_from_config, AuthStrategy, MockIdentityAuth, TrustedHeaderAuth};
