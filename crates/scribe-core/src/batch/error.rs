//! Batch processing errors.

use thiserror::Error;

use crate::Error;

/// Reasons a batch can fail.
///
/// The first two variants are raised by validation before any file is touched.
/// The per-file variants name the file that aborted the batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// No images were supplied.
    #[error("no images were supplied")]
    EmptyBatch,

    /// More images than the configured maximum were supplied.
    #[error("batch of {count} images exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Number of images received.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The file could not be decoded as an image.
    #[error("failed to decode '{filename}'")]
    FileDecode {
        /// Name of the offending file.
        filename: String,
        #[source]
        source: Error,
    },

    /// Enhancement, encoding or recognition failed for the file.
    #[error("failed to extract text from '{filename}'")]
    ExtractionEngine {
        /// Name of the offending file.
        filename: String,
        #[source]
        source: Error,
    },
}

impl BatchError {
    /// Returns the file that aborted the batch, if the failure was per-file.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::FileDecode { filename, .. } | Self::ExtractionEngine { filename, .. } => {
                Some(filename)
            }
            Self::EmptyBatch | Self::BatchTooLarge { .. } => None,
        }
    }

    /// Returns whether the failure was caused by the request shape rather than a file.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyBatch | Self::BatchTooLarge { .. })
    }

    /// Returns a short identifier for logs and error responses.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmptyBatch => "empty_batch",
            Self::BatchTooLarge { .. } => "batch_too_large",
            Self::FileDecode { .. } => "file_decode_error",
            Self::ExtractionEngine { .. } => "extraction_engine_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_file_errors_name_the_file() {
        let error = BatchError::FileDecode {
            filename: "scan.png".into(),
            source: Error::invalid_input(),
        };

        assert_eq!(error.filename(), Some("scan.png"));
        assert!(!error.is_client_error());
        assert!(error.to_string().contains("scan.png"));
    }

    #[test]
    fn validation_errors_are_client_errors() {
        let error = BatchError::BatchTooLarge { count: 11, max: 10 };

        assert!(error.is_client_error());
        assert_eq!(error.filename(), None);
        assert_eq!(error.name(), "batch_too_large");
        assert!(BatchError::EmptyBatch.is_client_error());
    }
}
