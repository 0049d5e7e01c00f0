//! Relay error types.

use thiserror::Error;

/// Type-erased error source.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for relay operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons a relay attempt can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The receiver could not be reached or answered with a failure.
    #[error("webhook transport failed: {message}")]
    TransportFailure {
        /// Short description of what went wrong.
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// The receiver answered without a usable summary.
    #[error("webhook returned no summary")]
    NoSummary,
}

impl Error {
    /// Creates a transport failure with a message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportFailure {
            message: message.into(),
            source: None,
        }
    }

    /// Attaches an underlying cause to a transport failure.
    #[must_use]
    pub fn with_source(self, cause: impl Into<BoxedError>) -> Self {
        match self {
            Self::TransportFailure { message, .. } => Self::TransportFailure {
                message,
                source: Some(cause.into()),
            },
            Self::NoSummary => Self::NoSummary,
        }
    }

    /// Returns a short identifier for logs and error responses.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransportFailure { .. } => "transport_failure",
            Self::NoSummary => "no_summary",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn transport_failure_keeps_source() {
        let cause = std::io::Error::other("connection reset");
        let error = Error::transport("request failed").with_source(cause);

        assert_eq!(error.name(), "transport_failure");
        assert!(error.source().is_some());
        assert!(error.to_string().contains("request failed"));
    }

    #[test]
    fn no_summary_ignores_source() {
        let error = Error::NoSummary.with_source(std::io::Error::other("ignored"));

        assert!(matches!(error, Error::NoSummary));
        assert!(error.source().is_none());
    }
}
