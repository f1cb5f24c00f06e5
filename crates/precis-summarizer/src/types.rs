//! Result types returned to the caller

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum number of insights ever returned for one summary
pub const MAX_INSIGHTS: usize = 5;

/// A single extracted insight: trimmed, non-empty, bullet marker removed.
///
/// Insights keep the order the model produced them in and are never
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Insight(String);

impl Insight {
    /// Create an insight from raw text, trimming surrounding whitespace.
    ///
    /// Returns `None` if nothing remains after trimming.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let trimmed = text.into().trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed))
        }
    }

    /// Placeholder insight returned when extraction fails.
    ///
    /// Insight extraction is best-effort: the caller always receives a
    /// non-empty list rather than an error.
    pub fn unavailable() -> Self {
        Self("Key insights could not be extracted".to_string())
    }

    /// The insight text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The outcome of one summarization request.
///
/// Created once per request and handed back to the caller; anything beyond
/// that (persistence, response shaping) is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// The final summary text
    pub summary: String,
    /// 0–5 insights, in generation order
    pub insights: Vec<Insight>,
    /// Wall-clock time from entry into `summarize` to return
    pub processing_time: Duration,
    /// Number of chunks the request covered
    pub chunks_processed: usize,
}
