use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a detected text region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A single region of recognized text.
///
/// Geometry and confidence are engine-specific and optional; the extraction
/// pipeline only consumes [`TextRegion::text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    /// Recognized text.
    pub text: String,
    /// Recognition confidence in `[0, 1]`, when the engine reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Location of the region in the source image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl TextRegion {
    /// Creates a region with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            bounding_box: None,
        }
    }

    /// Sets the recognition confidence.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Sets the bounding box.
    #[must_use]
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    /// Joins region texts with newline separators, in the given order.
    pub fn join(regions: &[TextRegion]) -> String {
        regions
            .iter()
            .map(|region| region.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_preserves_order_with_newlines() {
        let regions = vec![
            TextRegion::new("first"),
            TextRegion::new("second").with_confidence(0.9),
            TextRegion::new("third").with_bounding_box(BoundingBox::new(1, 2, 3, 4)),
        ];

        assert_eq!(TextRegion::join(&regions), "first\nsecond\nthird");
    }

    #[test]
    fn join_of_nothing_is_empty() {
        assert_eq!(TextRegion::join(&[]), "");
    }
}
