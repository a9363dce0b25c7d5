pub mod menu_service;
pub mod openai;

pub use menu_service::{MenuModels, MenuService};
pub use openai::OpenAiClient;
