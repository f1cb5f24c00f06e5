//! Trait definitions for external capabilities
//!
//! These traits define the boundaries between the pipeline and its
//! infrastructure. Implementations live in other crates: HTTP-backed
//! generation providers in `precis-llm`, exact tokenizers wherever the
//! host process obtains them.

use std::future::Future;

/// Converts text to a token count.
///
/// Counters are stateless, reentrant, and infallible: the decision between
/// an exact tokenizer and the character-based estimator is made once, when
/// the chunker is constructed, so a single chunking pass never mixes the
/// two and budgets stay consistent.
pub trait TokenCounter {
    /// Count the tokens in `text`
    fn count(&self, text: &str) -> usize;
}

/// Deterministic character-based token estimator.
///
/// Used whenever no exact tokenizer is available: roughly four characters
/// per token, rounded down. The estimate is over Unicode scalar values,
/// not bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatingCounter;

impl TokenCounter for EstimatingCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count() / 4
    }
}

/// Sampling and length options for one generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens the provider may produce
    pub max_output_tokens: u32,
    /// Sequences that terminate generation early
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 400,
            stop_sequences: Vec::new(),
        }
    }
}

/// The external text-generation capability.
///
/// A generation call may suspend for an extended period; transport timeouts
/// are owned by the implementation. Providers are read-only from the
/// pipeline's perspective and may serve multiple in-flight requests.
pub trait GenerationProvider {
    /// Error type for generation failures
    type Error: std::fmt::Display;

    /// Generate a completion for `prompt`
    fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_estimator_four_chars_per_token() {
        let counter = EstimatingCounter;
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("abcd"), 1);
        assert_eq!(counter.count("abcdefg"), 1);
        assert_eq!(counter.count("abcdefgh"), 2);
    }

    #[test]
    fn test_estimator_counts_chars_not_bytes() {
        let counter = EstimatingCounter;
        // Four 3-byte scalars are one estimated token, not three.
        assert_eq!(counter.count("日本語字"), 1);
    }

    proptest! {
        #[test]
        fn prop_estimator_deterministic(text in ".*") {
            let counter = EstimatingCounter;
            prop_assert_eq!(counter.count(&text), counter.count(&text));
        }

        #[test]
        fn prop_estimator_monotonic_in_length(text in ".*", suffix in ".+") {
            let counter = EstimatingCounter;
            let longer = format!("{text}{suffix}");
            prop_assert!(counter.count(&longer) >= counter.count(&text));
        }
    }
}
