//! Image enhancement applied before recognition.
//!
//! The pipeline runs four stages in a fixed order, each consuming the output of
//! the previous one: grayscale, binary threshold, contrast around the mean and
//! a sharpening convolution. The output of the full pipeline is always a
//! two-level image.

mod filters;

use std::io::Cursor;

use bytes::Bytes;
#[cfg(feature = "config")]
use clap::Args;
use image::{DynamicImage, GrayImage, ImageFormat};
use serde::{Deserialize, Serialize};

pub use self::filters::{contrast, grayscale, sharpen, threshold};
use crate::Result;

/// Default luminance level for the binary threshold.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Default contrast multiplier.
pub const DEFAULT_CONTRAST: f32 = 2.0;

/// Tunables for the enhancement pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct EnhanceConfig {
    /// Luminance level above which pixels become white.
    #[cfg_attr(
        feature = "config",
        arg(long = "enhance-threshold", env = "ENHANCE_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)
    )]
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// Contrast multiplier applied relative to the image mean.
    #[cfg_attr(
        feature = "config",
        arg(long = "enhance-contrast", env = "ENHANCE_CONTRAST", default_value_t = DEFAULT_CONTRAST)
    )]
    #[serde(default = "default_contrast")]
    pub contrast: f32,
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

fn default_contrast() -> f32 {
    DEFAULT_CONTRAST
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl EnhanceConfig {
    /// Returns whether the configured values can be applied.
    pub fn is_valid(&self) -> bool {
        self.contrast.is_finite() && self.contrast > 0.0
    }
}

/// The fixed grayscale, threshold, contrast, sharpen transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnhancementPipeline {
    config: EnhanceConfig,
}

impl EnhancementPipeline {
    /// Creates a pipeline with the given configuration.
    pub fn new(config: EnhanceConfig) -> Self {
        Self { config }
    }

    /// Returns the pipeline configuration.
    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    /// Runs all four stages on a decoded image.
    pub fn apply(&self, image: &DynamicImage) -> GrayImage {
        let gray = grayscale(image);
        let binary = threshold(&gray, self.config.threshold);
        let contrasted = contrast(&binary, self.config.contrast);
        sharpen(&contrasted)
    }
}

/// Encodes a grayscale image as PNG in memory.
pub fn encode_png(image: &GrayImage) -> Result<Bytes> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(Bytes::from(buffer.into_inner()))
}

#[cfg(test)]
mod tests {
    use image::{Luma, Rgb, RgbImage};

    use super::*;

    fn gradient() -> DynamicImage {
        let image = RgbImage::from_fn(32, 24, |x, y| {
            let value = ((x * 8) ^ (y * 5)) as u8;
            Rgb([value, value.wrapping_add(40), value / 2])
        });
        DynamicImage::ImageRgb8(image)
    }

    #[test]
    fn pipeline_output_is_binary() {
        let pipeline = EnhancementPipeline::default();
        let enhanced = pipeline.apply(&gradient());

        assert_eq!(enhanced.dimensions(), (32, 24));
        assert!(enhanced.pixels().all(|Luma([v])| *v == 0 || *v == 255));
    }

    #[test]
    fn pipeline_is_idempotent_on_binary_images() {
        let pipeline = EnhancementPipeline::default();
        let once = pipeline.apply(&gradient());
        let twice = pipeline.apply(&DynamicImage::ImageLuma8(once.clone()));

        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn encoded_png_decodes_to_same_pixels() {
        let enhanced = EnhancementPipeline::default().apply(&gradient());
        let encoded = encode_png(&enhanced).unwrap();

        assert_eq!(image::guess_format(&encoded).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&encoded).unwrap().to_luma8();
        assert_eq!(decoded.as_raw(), enhanced.as_raw());
    }

    #[test]
    fn config_validation() {
        assert!(EnhanceConfig::default().is_valid());

        let config = EnhanceConfig {
            contrast: 0.0,
            ..EnhanceConfig::default()
        };
        assert!(!config.is_valid());
    }
}
