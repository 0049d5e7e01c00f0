//! Shared OCR service handle.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;

use super::{OcrProvider, Result, ServiceHealth, TRACING_TARGET, TextRegion};

/// Cheap-to-clone handle to the process-wide OCR engine.
///
/// Constructed once at startup and shared by every request through the
/// application state. The provider behind it is responsible for its own
/// concurrency discipline (see [`OcrProvider`]).
#[derive(Clone)]
pub struct OcrService {
    inner: Arc<dyn OcrProvider>,
    name: Arc<str>,
}

impl OcrService {
    /// Wraps a provider into a service handle.
    pub fn new<P>(provider: P) -> Self
    where
        P: OcrProvider + 'static,
    {
        Self::from_arc(Arc::new(provider))
    }

    /// Wraps an already shared provider.
    pub fn from_arc(provider: Arc<dyn OcrProvider>) -> Self {
        Self {
            inner: provider,
            name: Arc::from("ocr"),
        }
    }

    /// Sets the name used to identify this engine in logs.
    #[must_use]
    pub fn with_name(mut self, name: impl AsRef<str>) -> Self {
        self.name = Arc::from(name.as_ref());
        self
    }

    /// Returns the engine name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recognizes text regions in an encoded image.
    pub async fn recognize(&self, image: Bytes) -> Result<Vec<TextRegion>> {
        let started_at = Instant::now();
        let image_bytes = image.len();

        match self.inner.recognize(image).await {
            Ok(regions) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    engine = %self.name,
                    image_bytes,
                    regions = regions.len(),
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    "recognition completed"
                );
                Ok(regions)
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    engine = %self.name,
                    image_bytes,
                    error = %error,
                    "recognition failed"
                );
                Err(error)
            }
        }
    }

    /// Checks the health of the engine.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let started_at = Instant::now();
        let health = self.inner.health_check().await?;
        Ok(health.with_response_time(started_at.elapsed()))
    }
}

impl fmt::Debug for OcrService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcrService")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
