//! Request extractors that report rejections in the server's error format.
//!
//! - [`Json`] - JSON deserialization with descriptive `400` responses
//! - [`Multipart`] - multipart form parsing with descriptive `400` responses

pub mod reject;

pub use crate::extract::reject::{Json, Multipart};
