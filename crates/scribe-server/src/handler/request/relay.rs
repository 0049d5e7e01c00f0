use serde::{Deserialize, Serialize};

/// Text to forward to the webhook.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayText {
    /// Text to summarize. A missing field is relayed as an empty string.
    #[serde(default)]
    pub text: String,
}
