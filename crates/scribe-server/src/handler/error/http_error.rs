//! HTTP error handling with builder pattern for dynamic error responses.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// The error type for HTTP handlers in the server.
///
/// Carries a kind that fixes the status code and default message, plus an
/// optional user-facing message override, the offending file name and an
/// internal context that is logged but never sent to the client.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
    file: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            file: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches internal context used for logging.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Overrides the user-facing message.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Sets the uploaded file that caused the error.
    #[inline]
    pub fn with_file(self, file: impl Into<Cow<'a, str>>) -> Self {
        Self {
            file: Some(file.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the file name if present.
    #[inline]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("name", &response.name)
            .field("status", &response.status);

        if let Some(ref message) = self.message {
            debug_struct.field("message", message);
        }

        if let Some(ref file) = self.file {
            debug_struct.field("file", file);
        }

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.error);

        write!(f, "{} ({}): {}", response.name, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        if let Some(ref file) = self.file {
            write!(f, " [file: {}]", file)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message.into_owned());
        }

        if let Some(file) = self.file {
            response = response.with_file(file.into_owned());
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for HTTP operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Every error the HTTP surface can report.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Invalid request data
    BadRequest,
    /// 400 Bad Request - No `files` part in the upload
    MissingFiles,
    /// 400 Bad Request - The `files` parts carried no images
    EmptyBatch,
    /// 400 Bad Request - More images than allowed
    BatchTooLarge,
    /// 404 Not Found - Unknown route
    NotFound,
    /// 413 Payload Too Large - Request body over the configured limit
    PayloadTooLarge,

    // 5xx Server Errors
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
    /// 500 Internal Server Error - An upload could not be decoded
    FileDecode,
    /// 500 Internal Server Error - Enhancement or recognition failed for an upload
    ExtractionEngine,
    /// 500 Internal Server Error - The webhook could not be reached
    TransportFailure,
    /// 500 Internal Server Error - The webhook returned no summary
    NoSummary,
    /// 503 Service Unavailable - A dependency is unhealthy
    ServiceUnavailable,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified context.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] naming the specified file.
    #[inline]
    pub fn with_file<'a>(self, file: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_file(file)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the default response for this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::MissingFiles => ErrorResponse::MISSING_FILES,
            Self::EmptyBatch => ErrorResponse::EMPTY_BATCH,
            Self::BatchTooLarge => ErrorResponse::BATCH_TOO_LARGE,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::PayloadTooLarge => ErrorResponse::PAYLOAD_TOO_LARGE,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::FileDecode => ErrorResponse::FILE_DECODE_ERROR,
            Self::ExtractionEngine => ErrorResponse::EXTRACTION_ENGINE_ERROR,
            Self::TransportFailure => ErrorResponse::TRANSPORT_FAILURE,
            Self::NoSummary => ErrorResponse::NO_SUMMARY,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_http_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        let _ = error.into_response();
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::FileDecode
            .with_message("Error processing file: a.png")
            .with_file("a.png")
            .with_context("unsupported format");

        assert_eq!(error.kind(), ErrorKind::FileDecode);
        assert_eq!(error.message(), Some("Error processing file: a.png"));
        assert_eq!(error.file(), Some("a.png"));
        assert_eq!(error.context(), Some("unsupported format"));
    }

    #[test]
    fn display_uses_default_message() {
        let display = ErrorKind::MissingFiles.into_error().to_string();

        assert!(display.contains("missing_files"));
        assert!(display.contains("400"));
        assert!(display.contains("No files part"));
    }

    #[test]
    fn status_codes() {
        let cases = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::MissingFiles, 400),
            (ErrorKind::EmptyBatch, 400),
            (ErrorKind::BatchTooLarge, 400),
            (ErrorKind::NotFound, 404),
            (ErrorKind::PayloadTooLarge, 413),
            (ErrorKind::InternalServerError, 500),
            (ErrorKind::FileDecode, 500),
            (ErrorKind::ExtractionEngine, 500),
            (ErrorKind::TransportFailure, 500),
            (ErrorKind::NoSummary, 500),
            (ErrorKind::ServiceUnavailable, 503),
        ];

        for (kind, status) in cases {
            assert_eq!(kind.status_code().as_u16(), status, "{kind}");
            assert!(!kind.response().name.is_empty());
        }
    }
}
