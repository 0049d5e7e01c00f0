//! Drop-in replacements for axum extractors whose rejections become
//! [`Error`](crate::handler::Error) responses.

pub mod enhanced_json;
pub mod enhanced_multipart;

pub use self::enhanced_json::Json;
pub use self::enhanced_multipart::Multipart;
