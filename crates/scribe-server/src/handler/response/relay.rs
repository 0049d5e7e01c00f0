use serde::{Deserialize, Serialize};

/// Summary returned by the webhook.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// The summary text.
    pub summary: String,
}
