#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod engine;
mod error;
mod provider;

pub use config::PaddleConfig;
pub use engine::{PaddleEngine, Recognizer};
pub use error::{Error, Result};
pub use provider::PaddleProvider;

/// Tracing target for engine operations.
pub const TRACING_TARGET: &str = "scribe_paddle";
