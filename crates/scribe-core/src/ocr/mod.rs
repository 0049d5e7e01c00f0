//! Optical Character Recognition (OCR) abstractions.
//!
//! This module defines the boundary between the extraction pipeline and the
//! recognition engine. The engine is a black box: encoded image bytes go in,
//! recognized text regions come out. Concrete engines live in their own crates
//! and are wrapped in an [`OcrService`] once at process start.

use bytes::Bytes;

mod region;
mod service;

pub use region::{BoundingBox, TextRegion};
pub use service::OcrService;

pub use crate::{Error, ErrorKind, Result, ServiceHealth};

/// Tracing target for OCR operations.
pub const TRACING_TARGET: &str = "scribe_core::ocr";

/// Core trait for OCR engines.
///
/// Implementations must be safe to call from many request handlers at once.
/// Engines that are not reentrant must serialize calls internally, for example
/// by owning the engine on a single worker thread.
#[async_trait::async_trait]
pub trait OcrProvider: Send + Sync {
    /// Recognizes text in an encoded image (PNG as produced by the enhancement stage).
    ///
    /// Regions are returned in the engine's reading order.
    async fn recognize(&self, image: Bytes) -> Result<Vec<TextRegion>>;

    /// Performs a health check on the engine.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
