//! Engine configuration.

use std::path::{Path, PathBuf};

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of requests that may wait for the worker.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Model paths and tuning for the local PaddleOCR engine.
///
/// There is no language setting: the recognition model and its dictionary
/// decide which script is read, so Croatian needs the Latin model and keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct PaddleConfig {
    /// Path to the text detection model
    #[cfg_attr(
        feature = "config",
        arg(long = "paddle-det-model", env = "PADDLE_DET_MODEL")
    )]
    pub detection_model: PathBuf,

    /// Path to the text recognition model
    #[cfg_attr(
        feature = "config",
        arg(long = "paddle-rec-model", env = "PADDLE_REC_MODEL")
    )]
    pub recognition_model: PathBuf,

    /// Path to the character dictionary matching the recognition model
    #[cfg_attr(feature = "config", arg(long = "paddle-keys", env = "PADDLE_KEYS"))]
    pub keys_path: PathBuf,

    /// Minimum confidence for recognized characters
    #[cfg_attr(
        feature = "config",
        arg(long = "paddle-min-score", env = "PADDLE_MIN_SCORE", default_value_t = 0.6)
    )]
    #[serde(default = "default_min_score")]
    pub min_score: f32,

    /// Minimum confidence for recognized punctuation
    #[cfg_attr(
        feature = "config",
        arg(long = "paddle-punct-min-score", env = "PADDLE_PUNCT_MIN_SCORE", default_value_t = 0.1)
    )]
    #[serde(default = "default_punct_min_score")]
    pub punct_min_score: f32,

    /// Distance under which neighbouring detections are merged
    #[cfg_attr(
        feature = "config",
        arg(long = "paddle-merge-threshold", env = "PADDLE_MERGE_THRESHOLD", default_value_t = 1)
    )]
    #[serde(default = "default_merge_threshold")]
    pub merge_threshold: i32,

    /// Number of requests that may wait for the engine
    #[cfg_attr(
        feature = "config",
        arg(long = "paddle-queue-capacity", env = "PADDLE_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)
    )]
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_min_score() -> f32 {
    0.6
}

fn default_punct_min_score() -> f32 {
    0.1
}

fn default_merge_threshold() -> i32 {
    1
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl PaddleConfig {
    /// Creates a configuration from the three model files.
    pub fn new(
        detection_model: impl AsRef<Path>,
        recognition_model: impl AsRef<Path>,
        keys_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            detection_model: detection_model.as_ref().to_path_buf(),
            recognition_model: recognition_model.as_ref().to_path_buf(),
            keys_path: keys_path.as_ref().to_path_buf(),
            min_score: default_min_score(),
            punct_min_score: default_punct_min_score(),
            merge_threshold: default_merge_threshold(),
            queue_capacity: default_queue_capacity(),
        }
    }

    /// Sets the minimum character confidence.
    #[must_use]
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Sets the queue capacity.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Returns the queue capacity, never less than one.
    pub fn effective_queue_capacity(&self) -> usize {
        self.queue_capacity.max(1)
    }

    /// Checks that every model file exists.
    pub fn validate(&self) -> Result<()> {
        for path in [
            &self.detection_model,
            &self.recognition_model,
            &self.keys_path,
        ] {
            if !path.is_file() {
                return Err(Error::MissingModel { path: path.clone() });
            }
        }

        Ok(())
    }
}
