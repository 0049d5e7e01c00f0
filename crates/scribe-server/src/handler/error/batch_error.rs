//! Batch error to HTTP error conversion.

use scribe_core::batch::BatchError;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for batch error conversions.
const TRACING_TARGET: &str = "scribe_server::handler::batch";

impl From<BatchError> for HttpError<'static> {
    fn from(error: BatchError) -> Self {
        match error {
            BatchError::EmptyBatch => ErrorKind::EmptyBatch.into_error(),

            BatchError::BatchTooLarge { count, max } => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    count,
                    max,
                    "batch rejected as too large"
                );

                ErrorKind::BatchTooLarge
                    .with_message(format!("You can upload a maximum of {max} images"))
                    .with_context(format!("received {count} images"))
            }

            BatchError::FileDecode { filename, source } => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    filename = %filename,
                    error = %source,
                    "upload could not be decoded"
                );

                ErrorKind::FileDecode
                    .with_message(format!("Error processing file: {filename}"))
                    .with_context(source.to_string())
                    .with_file(filename)
            }

            BatchError::ExtractionEngine { filename, source } => {
                tracing::error!(
                    target: TRACING_TARGET,
                    filename = %filename,
                    error = %source,
                    "text extraction failed"
                );

                ErrorKind::ExtractionEngine
                    .with_message(format!("Error processing file: {filename}"))
                    .with_context(source.to_string())
                    .with_file(filename)
            }
        }
    }
}
