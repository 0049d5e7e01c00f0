//! Single-channel image filters used by the enhancement pipeline.

use image::{DynamicImage, GrayImage, Luma};

/// Edge-enhancing 3x3 kernel, normalized by [`SHARPEN_DIVISOR`].
const SHARPEN_KERNEL: [[i32; 3]; 3] = [[-2, -2, -2], [-2, 32, -2], [-2, -2, -2]];

/// Sum of [`SHARPEN_KERNEL`] weights.
const SHARPEN_DIVISOR: f32 = 16.0;

/// Converts any image to single-channel 8-bit luminance.
pub fn grayscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Two-level quantization: pixels above `level` become white, the rest black.
pub fn threshold(image: &GrayImage, level: u8) -> GrayImage {
    let mut output = image.clone();
    for Luma([value]) in output.pixels_mut() {
        *value = if *value > level { u8::MAX } else { u8::MIN };
    }
    output
}

/// Scales each pixel's distance from the image's own mean luminance by `factor`.
///
/// A factor of `1.0` is the identity and `0.0` yields a flat image at the mean.
pub fn contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let Some(mean) = mean_luminance(image) else {
        return image.clone();
    };

    let mut output = image.clone();
    for Luma([value]) in output.pixels_mut() {
        let scaled = mean + factor * (f32::from(*value) - mean);
        *value = clamp_to_u8(scaled);
    }
    output
}

/// Applies the sharpening convolution. Border pixels are copied unchanged.
pub fn sharpen(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut output = image.clone();
    if width < 3 || height < 3 {
        return output;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut acc = 0i32;
            for (dy, row) in SHARPEN_KERNEL.iter().enumerate() {
                for (dx, weight) in row.iter().enumerate() {
                    let Luma([value]) = *image.get_pixel(x + dx as u32 - 1, y + dy as u32 - 1);
                    acc += weight * i32::from(value);
                }
            }
            output.put_pixel(x, y, Luma([clamp_to_u8(acc as f32 / SHARPEN_DIVISOR)]));
        }
    }

    output
}

/// Rounded mean luminance, or `None` for an empty image.
fn mean_luminance(image: &GrayImage) -> Option<f32> {
    let pixels = image.as_raw();
    if pixels.is_empty() {
        return None;
    }

    let sum: u64 = pixels.iter().map(|&value| u64::from(value)).sum();
    Some((sum as f64 / pixels.len() as f64).round() as f32)
}

fn clamp_to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
