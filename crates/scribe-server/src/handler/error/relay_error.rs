//! Relay error to HTTP error conversion.

use scribe_webhook::Error as RelayError;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for relay error conversions.
const TRACING_TARGET: &str = "scribe_server::handler::relay";

impl From<RelayError> for HttpError<'static> {
    fn from(error: RelayError) -> Self {
        match error {
            RelayError::TransportFailure { .. } => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "webhook delivery failed"
                );

                ErrorKind::TransportFailure.with_context(error.to_string())
            }
            RelayError::NoSummary => {
                tracing::warn!(target: TRACING_TARGET, "webhook returned no summary");
                ErrorKind::NoSummary.into_error()
            }
        }
    }
}
