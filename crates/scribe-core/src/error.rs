//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source of structured errors so that any backend error can be
/// wrapped while keeping the `Send + Sync` bounds needed by async tasks.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in OCR provider operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input could not be interpreted (e.g. undecodable image bytes).
    InvalidInput,
    /// The recognition engine failed while processing the input.
    EngineFailure,
    /// The engine is not running or can no longer accept work.
    Unavailable,
    /// Image encoding or decoding failed.
    Serialization,
    /// Configuration error (e.g. missing model files).
    Configuration,
    /// Unexpected internal error.
    Internal,
}

/// A structured error type for OCR provider operations.
#[derive(Debug, Error)]
#[error("{}{}", .kind.as_str(), .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl ErrorKind {
    /// Returns the error kind as a static string.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new engine failure error.
    pub fn engine_failure() -> Self {
        Self::new(ErrorKind::EngineFailure)
    }

    /// Creates a new unavailable error.
    pub fn unavailable() -> Self {
        Self::new(ErrorKind::Unavailable)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new internal error.
    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<image::ImageError> for Error {
    fn from(error: image::ImageError) -> Self {
        let kind = match error {
            image::ImageError::Decoding(_) | image::ImageError::Unsupported(_) => {
                ErrorKind::InvalidInput
            }
            _ => ErrorKind::Serialization,
        };

        Self::new(kind)
            .with_message(error.to_string())
            .with_source(error)
    }
}
