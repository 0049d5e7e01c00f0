//! Relay service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{RelayPayload, RelayProvider, Result, TRACING_TARGET};

/// Relay service wrapper with observability.
///
/// Adds structured logging to any relay implementation. The inner provider is
/// wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct RelayService {
    inner: Arc<dyn RelayProvider>,
}

impl fmt::Debug for RelayService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayService").finish_non_exhaustive()
    }
}

impl RelayService {
    /// Creates a new relay service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: RelayProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Forwards text and returns the receiver's summary.
    pub async fn relay(&self, text: impl Into<String>) -> Result<String> {
        let payload = RelayPayload::new(text);
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            text_len = payload.text.len(),
            "relaying text"
        );

        let result = self.inner.relay(&payload).await;
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        match &result {
            Ok(summary) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    summary_len = summary.len(),
                    elapsed_ms,
                    "summary received"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    kind = error.name(),
                    elapsed_ms,
                    "relay failed"
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct EchoRelay;

    #[async_trait::async_trait]
    impl RelayProvider for EchoRelay {
        async fn relay(&self, payload: &RelayPayload) -> Result<String> {
            if payload.text.is_empty() {
                return Err(Error::NoSummary);
            }
            Ok(format!("summary of {} bytes", payload.text.len()))
        }
    }

    #[tokio::test]
    async fn forwards_text_to_provider() {
        let service = RelayService::new(EchoRelay);

        assert_eq!(service.relay("abc").await.unwrap(), "summary of 3 bytes");
        assert!(matches!(service.relay("").await, Err(Error::NoSummary)));
    }
}
