use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// HTTP error response body.
///
/// Serialized as `{"error": ..., "name": ...}` with an optional `file` naming
/// the upload that failed.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// User-facing error message
    pub error: Cow<'a, str>,
    /// Stable error identifier
    pub name: Cow<'a, str>,
    /// The uploaded file the error relates to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const BATCH_TOO_LARGE: Self = Self::new(
        "batch_too_large",
        "You can upload a maximum of 10 images",
        StatusCode::BAD_REQUEST,
    );
    pub const EMPTY_BATCH: Self = Self::new(
        "empty_batch",
        "No files selected",
        StatusCode::BAD_REQUEST,
    );
    pub const MISSING_FILES: Self =
        Self::new("missing_files", "No files part", StatusCode::BAD_REQUEST);
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "The request body is too large",
        StatusCode::PAYLOAD_TOO_LARGE,
    );

    // 5xx Server Errors
    pub const EXTRACTION_ENGINE_ERROR: Self = Self::new(
        "extraction_engine_error",
        "Error processing file",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const FILE_DECODE_ERROR: Self = Self::new(
        "file_decode_error",
        "Error processing file",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const NO_SUMMARY: Self = Self::new(
        "no_summary",
        "No summary returned from webhook",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "The service is temporarily unavailable",
        StatusCode::SERVICE_UNAVAILABLE,
    );
    pub const TRANSPORT_FAILURE: Self = Self::new(
        "transport_failure",
        "Failed to send to webhook",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, error: &'a str, status: StatusCode) -> Self {
        Self {
            error: Cow::Borrowed(error),
            name: Cow::Borrowed(name),
            file: None,
            status,
        }
    }

    /// Replaces the user-facing message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.error = message.into();
        self
    }

    /// Names the uploaded file the error relates to.
    pub fn with_file(mut self, file: impl Into<Cow<'a, str>>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_error_and_name() {
        let response = ErrorResponse::EMPTY_BATCH;
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "error": "No files selected", "name": "empty_batch" })
        );
    }

    #[test]
    fn includes_file_when_set() {
        let response = ErrorResponse::FILE_DECODE_ERROR
            .with_message("Error processing file: scan.png")
            .with_file("scan.png");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "Error processing file: scan.png");
        assert_eq!(json["file"], "scan.png");
        assert!(json.get("status").is_none());
    }
}
