//! # MenuGen Shared
//!
//! Types, upload policy and telemetry shared by the gateway and the client.

pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod upload;
pub mod utils;

pub use error::UploadRejection;
pub use types::*;
pub use upload::UploadPolicy;
