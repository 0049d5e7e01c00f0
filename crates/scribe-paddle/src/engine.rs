//! Synchronous PaddleOCR engine.

use image::DynamicImage;
use rust_paddle_ocr::{Det, Rec};
use scribe_core::ocr::{BoundingBox, TextRegion};

use crate::{Error, PaddleConfig, Result, TRACING_TARGET};

/// Blocking text recognizer owned by the worker thread.
///
/// Implementations may hold state that is neither `Send` nor reentrant: the
/// worker constructs the recognizer on its own thread and only ever calls it
/// from there.
pub trait Recognizer {
    /// Recognizes text regions in a decoded image, in reading order.
    fn recognize(&mut self, image: &DynamicImage) -> Result<Vec<TextRegion>>;
}

/// Detection and recognition models loaded from disk.
///
/// `rust-paddle-ocr` has no angle classifier, so text lines are read as
/// upright and rotated crops are not turned before recognition.
pub struct PaddleEngine {
    det: Det,
    rec: Rec,
}

impl PaddleEngine {
    /// Loads both models described by the configuration.
    pub fn load(config: &PaddleConfig) -> Result<Self> {
        config.validate()?;

        let det = Det::from_file(config.detection_model.as_path())
            .map_err(|e| Error::ModelLoad {
                model: "detection",
                message: e.to_string(),
            })?
            .with_merge_boxes(true)
            .with_merge_threshold(config.merge_threshold);

        let rec = Rec::from_file(config.recognition_model.as_path(), config.keys_path.as_path())
            .map_err(|e| Error::ModelLoad {
                model: "recognition",
                message: e.to_string(),
            })?
            .with_min_score(config.min_score)
            .with_punct_min_score(config.punct_min_score);

        tracing::info!(
            target: TRACING_TARGET,
            detection_model = %config.detection_model.display(),
            recognition_model = %config.recognition_model.display(),
            "models loaded"
        );

        Ok(Self { det, rec })
    }
}

impl Recognizer for PaddleEngine {
    fn recognize(&mut self, image: &DynamicImage) -> Result<Vec<TextRegion>> {
        let rects = self
            .det
            .find_text_rect(image)
            .map_err(|e| Error::Detection(e.to_string()))?;

        let mut regions = Vec::with_capacity(rects.len());
        for rect in rects {
            let x = rect.left().max(0) as u32;
            let y = rect.top().max(0) as u32;
            let crop = image.crop_imm(x, y, rect.width(), rect.height());

            let text = self
                .rec
                .predict_str(&crop)
                .map_err(|e| Error::Recognition(e.to_string()))?;

            if text.trim().is_empty() {
                continue;
            }

            let bounding_box = BoundingBox::new(x, y, rect.width(), rect.height());
            regions.push(TextRegion::new(text).with_bounding_box(bounding_box));
        }

        Ok(regions)
    }
}
