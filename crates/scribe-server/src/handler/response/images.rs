use serde::{Deserialize, Serialize};

/// Text extracted from an uploaded batch.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Each image's text in upload order, every one followed by a blank line.
    pub extracted_text: String,
}
