//! Bullet-style insight parsing
//!
//! The insight call asks the model for 3–5 bullet points. Parsing is a
//! line-prefix heuristic: a line counts as an insight only if it opens with
//! a known bullet marker. A non-empty response that matches no bullets still
//! yields one truncated insight, so produced text is never discarded as an
//! empty result.

use crate::types::{Insight, MAX_INSIGHTS};

const BULLET_MARKERS: [char; 3] = ['•', '-', '*'];

/// Characters of the raw response kept by the unparseable-response fallback
const FALLBACK_CHARS: usize = 100;

/// Prompt for the insight-extraction call
pub(crate) fn insight_prompt(summary: &str) -> String {
    format!(
        "Extract 3-5 key insights from this summary as bullet points:\n\n{}\n\n\
         Format as simple bullet points, one insight per line:",
        summary
    )
}

/// Parse bullet-marked lines out of a generation response.
///
/// Accepted lines have the marker and surrounding whitespace stripped; at
/// most [`MAX_INSIGHTS`] are returned, in response order, without
/// deduplication. An empty response yields an empty list; a non-empty
/// response with no parseable bullets yields a single insight holding the
/// response's first [`FALLBACK_CHARS`] characters.
pub fn parse_insights(response: &str) -> Vec<Insight> {
    let mut insights = Vec::new();

    for line in response.lines() {
        if insights.len() == MAX_INSIGHTS {
            break;
        }
        let line = line.trim();
        if line.starts_with(BULLET_MARKERS) {
            let stripped =
                line.trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c == ' ');
            if let Some(insight) = Insight::new(stripped) {
                insights.push(insight);
            }
        }
    }

    if insights.is_empty() {
        if let Some(fallback) = truncated_fallback(response) {
            insights.push(fallback);
        }
    }

    insights
}

fn truncated_fallback(response: &str) -> Option<Insight> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.chars().count() > FALLBACK_CHARS {
        let mut text: String = trimmed.chars().take(FALLBACK_CHARS).collect();
        text.push_str("...");
        Insight::new(text)
    } else {
        Insight::new(trimmed)
    }
}
