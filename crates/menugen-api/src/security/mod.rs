pub mod cors;
pub mod headers;
pub mod upload;

pub use cors::{cors_layer, OriginMatcher};
pub use headers::security_headers;
pub use upload::read_image_field;
