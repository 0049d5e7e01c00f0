//! PaddleOCR engine errors.

use std::path::PathBuf;

/// Result type for engine operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure modes of the local engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A model or dictionary file is missing or unreadable.
    #[error("model file not found: {}", path.display())]
    MissingModel {
        /// Path that was configured.
        path: PathBuf,
    },

    /// The engine rejected a model while loading it.
    #[error("failed to load {model} model: {message}")]
    ModelLoad {
        /// Which model failed (`detection` or `recognition`).
        model: &'static str,
        /// Message reported by the engine.
        message: String,
    },

    /// The image handed to the engine could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Text detection failed.
    #[error("text detection failed: {0}")]
    Detection(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// The engine panicked while handling a request.
    #[error("engine panicked while recognizing text")]
    Panicked,

    /// The worker thread is gone and no longer accepts requests.
    #[error("engine worker is not running")]
    WorkerStopped,
}

impl From<Error> for scribe_core::Error {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::MissingModel { .. } | Error::ModelLoad { .. } => {
                scribe_core::Error::configuration().with_message(message)
            }
            Error::Decode(e) => scribe_core::Error::invalid_input()
                .with_message(message)
                .with_source(e),
            Error::Detection(_) | Error::Recognition(_) => {
                scribe_core::Error::engine_failure().with_message(message)
            }
            Error::Panicked => scribe_core::Error::internal().with_message(message),
            Error::WorkerStopped => scribe_core::Error::unavailable().with_message(message),
        }
    }
}
