//! Sequential, fail-fast batch processor.

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use bytes::Bytes;
#[cfg(feature = "config")]
use clap::Args;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

use super::{BatchError, TRACING_TARGET, UploadedImage};
use crate::Error;
use crate::enhance::{EnhanceConfig, EnhancementPipeline, encode_png};
use crate::ocr::{OcrService, TextRegion};

/// Default maximum number of images accepted in one batch.
pub const DEFAULT_MAX_FILES: usize = 10;

/// Separator appended after each image's text.
const SEGMENT_SEPARATOR: &str = "\n\n";

/// Batch limits and enhancement settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct BatchConfig {
    /// Maximum number of images accepted in one batch.
    #[cfg_attr(
        feature = "config",
        arg(long = "max-files", env = "MAX_FILES", default_value_t = DEFAULT_MAX_FILES)
    )]
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Enhancement applied to every image before recognition.
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    pub enhance: EnhanceConfig,
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            enhance: EnhanceConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Sets the maximum batch size.
    #[must_use]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Returns whether the configured values can be applied.
    pub fn is_valid(&self) -> bool {
        self.max_files > 0 && self.enhance.is_valid()
    }
}

/// Which preparation step failed for a file.
enum PrepareFailure {
    Decode(Error),
    Encode(Error),
}

/// Turns an ordered set of uploads into one text result.
///
/// Files are processed strictly in upload order, one at a time. CPU-bound
/// decoding and enhancement run on the blocking pool; recognition goes through
/// the shared [`OcrService`].
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    ocr: OcrService,
    config: BatchConfig,
    pipeline: EnhancementPipeline,
}

impl BatchProcessor {
    /// Creates a processor backed by the given OCR service.
    pub fn new(ocr: OcrService, config: BatchConfig) -> Self {
        Self {
            ocr,
            pipeline: EnhancementPipeline::new(config.enhance),
            config,
        }
    }

    /// Returns the processor configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Returns the maximum number of images per batch.
    pub fn max_files(&self) -> usize {
        self.config.max_files
    }

    /// Returns the OCR service used for recognition.
    pub fn ocr(&self) -> &OcrService {
        &self.ocr
    }

    /// Checks the batch size without touching any image.
    pub fn validate(&self, count: usize) -> Result<(), BatchError> {
        if count == 0 {
            return Err(BatchError::EmptyBatch);
        }

        if count > self.config.max_files {
            return Err(BatchError::BatchTooLarge {
                count,
                max: self.config.max_files,
            });
        }

        Ok(())
    }

    /// Extracts text from every image, in upload order.
    ///
    /// Each image's text is followed by a blank line. The first failing file
    /// aborts the batch and no partial text is returned.
    pub async fn process(&self, images: Vec<UploadedImage>) -> Result<String, BatchError> {
        self.validate(images.len())?;

        let batch_size = images.len();
        let started_at = Instant::now();
        let mut extracted = String::new();

        tracing::debug!(
            target: TRACING_TARGET,
            batch_size,
            max_files = self.config.max_files,
            "processing batch"
        );

        for (index, image) in images.into_iter().enumerate() {
            let text = self.process_file(index, image).await.inspect_err(|error| {
                tracing::warn!(
                    target: TRACING_TARGET,
                    index,
                    batch_size,
                    filename = error.filename().unwrap_or_default(),
                    error = %error,
                    "aborting batch"
                );
            })?;

            extracted.push_str(&text);
            extracted.push_str(SEGMENT_SEPARATOR);
        }

        tracing::info!(
            target: TRACING_TARGET,
            batch_size,
            text_len = extracted.len(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "batch processed"
        );

        Ok(extracted)
    }

    /// Runs decode, enhancement, encoding and recognition for one file.
    async fn process_file(&self, index: usize, image: UploadedImage) -> Result<String, BatchError> {
        let started_at = Instant::now();
        let UploadedImage { filename, data, .. } = image;
        let image_bytes = data.len();

        let pipeline = self.pipeline;
        let prepared = tokio::task::spawn_blocking(move || prepare(&pipeline, &data)).await;

        let encoded = match prepared {
            Ok(Ok(encoded)) => encoded,
            Ok(Err(PrepareFailure::Decode(source))) => {
                return Err(BatchError::FileDecode { filename, source });
            }
            Ok(Err(PrepareFailure::Encode(source))) => {
                return Err(BatchError::ExtractionEngine { filename, source });
            }
            Err(join_error) => {
                let source = Error::internal()
                    .with_message(format!("image preparation aborted: {join_error}"));
                return Err(BatchError::ExtractionEngine { filename, source });
            }
        };

        let recognized = AssertUnwindSafe(self.ocr.recognize(encoded))
            .catch_unwind()
            .await;

        let regions = match recognized {
            Ok(Ok(regions)) => regions,
            Ok(Err(source)) => return Err(BatchError::ExtractionEngine { filename, source }),
            Err(_panic) => {
                let source = Error::internal().with_message("recognition panicked");
                return Err(BatchError::ExtractionEngine { filename, source });
            }
        };

        tracing::debug!(
            target: TRACING_TARGET,
            index,
            filename = %filename,
            image_bytes,
            regions = regions.len(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "file processed"
        );

        Ok(TextRegion::join(&regions))
    }
}

/// Decodes, enhances and re-encodes one upload.
fn prepare(pipeline: &EnhancementPipeline, data: &[u8]) -> Result<Bytes, PrepareFailure> {
    let decoded = image::load_from_memory(data).map_err(|e| PrepareFailure::Decode(e.into()))?;
    let enhanced = pipeline.apply(&decoded);
    encode_png(&enhanced).map_err(PrepareFailure::Encode)
}
