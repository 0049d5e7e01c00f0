//! Mock OCR provider for tests and model-free local runs.
//!
//! This module is only available when the `mock` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! scribe-core = { version = "...", features = ["mock"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use scribe_core::mock::{MockConfig, MockProvider};
//!
//! let ocr = MockProvider::default().into_service();
//!
//! let config = MockConfig {
//!     mock_text: Some("first line\nsecond line".into()),
//! };
//! let ocr = config.into_service();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::ocr::{OcrProvider, OcrService, TextRegion};
use crate::{Error, Result, ServiceHealth};

/// Text returned when no mock text is configured.
pub const DEFAULT_MOCK_TEXT: &str = "mock recognized text";

/// Configuration for the mock provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct MockConfig {
    /// Text to return for every image, one region per line.
    #[cfg_attr(feature = "config", arg(long = "mock-text", env = "MOCK_TEXT"))]
    #[serde(default)]
    pub mock_text: Option<String>,
}

impl MockConfig {
    /// Converts this configuration into an OCR service.
    pub fn into_service(self) -> OcrService {
        MockProvider::new(self).into_service()
    }
}

/// OCR provider returning fixed text.
///
/// Clones share the call counter, so tests can observe how many images reached
/// the engine through any handle.
#[derive(Clone, Debug, Default)]
pub struct MockProvider {
    config: Arc<MockConfig>,
    failure: Option<Arc<str>>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Creates a new mock provider with the given configuration.
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            ..Self::default()
        }
    }

    /// Creates a provider whose recognition always fails with an engine error.
    pub fn failing(message: impl AsRef<str>) -> Self {
        Self {
            failure: Some(Arc::from(message.as_ref())),
            ..Self::default()
        }
    }

    /// Returns how many images were passed to [`OcrProvider::recognize`].
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wraps this provider into an OCR service.
    pub fn into_service(self) -> OcrService {
        OcrService::new(self).with_name("mock")
    }

    fn text(&self) -> &str {
        self.config.mock_text.as_deref().unwrap_or(DEFAULT_MOCK_TEXT)
    }
}

#[async_trait::async_trait]
impl OcrProvider for MockProvider {
    async fn recognize(&self, image: Bytes) -> Result<Vec<TextRegion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(Error::engine_failure().with_message(message.as_ref()));
        }

        if image.is_empty() {
            return Err(Error::invalid_input().with_message("empty image"));
        }

        let regions = self
            .text()
            .lines()
            .map(|line| TextRegion::new(line).with_confidence(1.0))
            .collect();

        Ok(regions)
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        match &self.failure {
            Some(message) => Ok(ServiceHealth::unhealthy(message.as_ref())),
            None => Ok(ServiceHealth::healthy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_lines_as_regions() {
        let provider = MockProvider::new(MockConfig {
            mock_text: Some("Račun br. 12\nUkupno: 40,00".into()),
        });

        let regions = provider
            .recognize(Bytes::from_static(b"png"))
            .await
            .unwrap();

        assert_eq!(TextRegion::join(&regions), "Račun br. 12\nUkupno: 40,00");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn failing_provider_reports_engine_failure() {
        let provider = MockProvider::failing("model not loaded");
        let error = provider
            .recognize(Bytes::from_static(b"png"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), crate::ErrorKind::EngineFailure);
        assert!(!provider.health_check().await.unwrap().is_operational());
    }

    #[tokio::test]
    async fn default_text_is_used() {
        let service = MockProvider::default().into_service();
        let regions = service.recognize(Bytes::from_static(b"png")).await.unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].text, DEFAULT_MOCK_TEXT);
        assert_eq!(service.name(), "mock");
    }
}
