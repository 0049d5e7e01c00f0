//! Relay request and response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// JSON body sent to the webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPayload {
    /// Text to summarize. May be empty.
    #[serde(default)]
    pub text: String,
}

impl RelayPayload {
    /// Creates a payload carrying the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// JSON body expected back from the webhook.
///
/// Fields other than `summary` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Summary produced by the receiver.
    #[serde(default)]
    pub summary: Option<String>,
}

impl SummaryResponse {
    /// Interprets an arbitrary JSON reply.
    ///
    /// Replies that are not objects, or whose `summary` is missing, not a
    /// string or empty, carry no summary.
    pub fn from_value(value: Value) -> Result<String> {
        let summary = value
            .as_object()
            .and_then(|object| object.get("summary"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self { summary }.into_summary()
    }

    /// Returns the summary if one is present and non-empty.
    pub fn into_summary(self) -> Result<String> {
        match self.summary {
            Some(summary) if !summary.is_empty() => Ok(summary),
            _ => Err(Error::NoSummary),
        }
    }
}
