pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::build_router;
pub use state::AppState;
