//! Prompt templates for summarization
//!
//! A template is caller-supplied text with exactly one `{text}` insertion
//! point; the chunk (or combined partials) is substituted at render time.
//! Three built-in templates cover the common document kinds.

use crate::SummarizeError;

/// The placeholder a template must contain exactly once
pub const INSERTION_POINT: &str = "{text}";

const GENERAL: &str = "Provide a clear, comprehensive summary of the following document, \
covering its main points and conclusions:\n\n{text}\n\nSummary:";

const CUSTOMER_FEEDBACK: &str = "Summarize the following customer feedback. Highlight \
recurring themes, overall sentiment, and concrete complaints or requests:\n\n{text}\n\nSummary:";

const CONTRACT_ANALYSIS: &str = "Summarize the following contract text. Identify the \
parties, key obligations, payment terms, deadlines, and notable risks or unusual \
clauses:\n\n{text}\n\nSummary:";

/// Instruction prepended to the combined partial summaries for the reduce
/// call.
pub(crate) const REDUCE_INSTRUCTION: &str =
    "Create a comprehensive summary from these partial summaries:";

/// A validated summarization prompt template.
///
/// Construction rejects templates without exactly one [`INSERTION_POINT`],
/// so rendering can never silently drop the document text or duplicate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Validate and wrap a caller-supplied template
    pub fn new(template: impl Into<String>) -> Result<Self, SummarizeError> {
        let template = template.into();
        match template.matches(INSERTION_POINT).count() {
            0 => Err(SummarizeError::Template(format!(
                "missing a {} insertion point",
                INSERTION_POINT
            ))),
            1 => Ok(Self { template }),
            n => Err(SummarizeError::Template(format!(
                "expected exactly one {} insertion point, found {}",
                INSERTION_POINT, n
            ))),
        }
    }

    /// Built-in template for general documents
    pub fn general() -> Self {
        Self {
            template: GENERAL.to_string(),
        }
    }

    /// Built-in template for customer feedback documents
    pub fn customer_feedback() -> Self {
        Self {
            template: CUSTOMER_FEEDBACK.to_string(),
        }
    }

    /// Built-in template for contracts
    pub fn contract_analysis() -> Self {
        Self {
            template: CONTRACT_ANALYSIS.to_string(),
        }
    }

    /// Substitute `text` at the insertion point
    pub fn render(&self, text: &str) -> String {
        self.template.replacen(INSERTION_POINT, text, 1)
    }

    /// The raw template text
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_single_insertion_point() {
        let template = PromptTemplate::new("Summarize:\n\n{text}").unwrap();
        assert_eq!(template.render("the body"), "Summarize:\n\nthe body");
    }

    #[test]
    fn test_rejects_missing_insertion_point() {
        let result = PromptTemplate::new("Summarize the document.");
        assert!(matches!(result, Err(SummarizeError::Template(_))));
    }

    #[test]
    fn test_rejects_multiple_insertion_points() {
        let result = PromptTemplate::new("{text} and again {text}");
        assert!(matches!(result, Err(SummarizeError::Template(_))));
    }

    #[test]
    fn test_builtin_templates_validate() {
        for raw in [GENERAL, CUSTOMER_FEEDBACK, CONTRACT_ANALYSIS] {
            assert!(PromptTemplate::new(raw).is_ok());
        }
    }

    #[test]
    fn test_render_keeps_surrounding_text() {
        let template = PromptTemplate::general();
        let rendered = template.render("DOC BODY");
        assert!(rendered.contains("DOC BODY"));
        assert!(rendered.ends_with("Summary:"));
        assert!(!rendered.contains(INSERTION_POINT));
    }

    #[test]
    fn test_render_substitutes_once_even_if_text_contains_placeholder() {
        let template = PromptTemplate::new("Before {text} after").unwrap();
        assert_eq!(
            template.render("literal {text} inside"),
            "Before literal {text} inside after"
        );
    }
}
