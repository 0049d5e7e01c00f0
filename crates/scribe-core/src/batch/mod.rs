//! Multi-file extraction with per-file fault isolation.
//!
//! A batch is an ordered set of uploads processed one after another. Text is
//! assembled in upload order. The first per-file failure aborts the batch and
//! everything accumulated so far is discarded.

mod error;
mod processor;
mod upload;

pub use error::BatchError;
pub use processor::{BatchConfig, BatchProcessor, DEFAULT_MAX_FILES};
pub use upload::UploadedImage;

/// Tracing target for batch processing.
pub const TRACING_TARGET: &str = "scribe_core::batch";
