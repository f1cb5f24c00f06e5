//! Precis Generation Provider Layer
//!
//! Implementations of the `GenerationProvider` trait from `precis-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic scripted provider for testing
//! - `OllamaProvider`: local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use precis_llm::MockProvider;
//! use precis_domain::{GenerationOptions, GenerationProvider};
//!
//! # async fn example() {
//! let provider = MockProvider::new("Hello from the model!");
//! let result = provider
//!     .generate("test prompt", &GenerationOptions::default())
//!     .await
//!     .unwrap();
//! assert_eq!(result, "Hello from the model!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;

use precis_domain::{GenerationOptions, GenerationProvider};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::{ModelInfo, OllamaProvider};

/// Errors that can occur during generation calls
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Network, timeout, or non-success HTTP status
    #[error("transport error: {0}")]
    Transport(String),

    /// Transport succeeded but the provider produced no usable text
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// Response body could not be understood
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The requested model is not available on the provider
    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    /// The provider is unreachable or misconfigured at startup
    #[error("provider not configured: {0}")]
    Configuration(String),
}

/// One recorded `generate` call made against a [`MockProvider`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The prompt the caller passed
    pub prompt: String,
    /// The options the caller passed
    pub options: GenerationOptions,
}

/// Deterministic scripted provider for testing.
///
/// Returns queued responses in order, falling back to a fixed default once
/// the script is exhausted, and records every call it receives. Clones share
/// the same script and call log.
///
/// # Examples
///
/// ```
/// use precis_llm::{GenerationError, MockProvider};
/// use precis_domain::{GenerationOptions, GenerationProvider};
///
/// # async fn example() {
/// let provider = MockProvider::new("default");
/// provider.push_response("first");
/// provider.push_failure(GenerationError::Transport("boom".into()));
///
/// let opts = GenerationOptions::default();
/// assert_eq!(provider.generate("a", &opts).await.unwrap(), "first");
/// assert!(provider.generate("b", &opts).await.is_err());
/// assert_eq!(provider.generate("c", &opts).await.unwrap(), "default");
/// assert_eq!(provider.call_count(), 3);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    script: Arc<Mutex<VecDeque<Result<String, GenerationError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a provider that answers every call with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful response for the next unscripted call
    pub fn push_response(&self, response: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unscripted call
    pub fn push_failure(&self, error: GenerationError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Number of `generate` calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of every call received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl GenerationProvider for MockProvider {
    type Error = GenerationError;

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(scripted) => scripted,
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> GenerationOptions {
        GenerationOptions::default()
    }

    #[tokio::test]
    async fn test_mock_provider_default_response() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt", &opts()).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_scripted_order() {
        let provider = MockProvider::new("default");
        provider.push_response("one");
        provider.push_response("two");

        assert_eq!(provider.generate("p", &opts()).await.unwrap(), "one");
        assert_eq!(provider.generate("p", &opts()).await.unwrap(), "two");
        assert_eq!(provider.generate("p", &opts()).await.unwrap(), "default");
    }

    #[tokio::test]
    async fn test_mock_provider_failure_injection() {
        let provider = MockProvider::default();
        provider.push_response("ok");
        provider.push_failure(GenerationError::Transport("connection reset".into()));

        assert!(provider.generate("p", &opts()).await.is_ok());
        let err = provider.generate("p", &opts()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[tokio::test]
    async fn test_mock_provider_records_calls() {
        let provider = MockProvider::new("r");
        let options = GenerationOptions {
            temperature: 0.3,
            max_output_tokens: 200,
            stop_sequences: vec!["END".to_string()],
        };

        provider.generate("first prompt", &options).await.unwrap();
        provider.generate("second prompt", &opts()).await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].prompt, "first prompt");
        assert_eq!(calls[0].options.temperature, 0.3);
        assert_eq!(calls[0].options.stop_sequences, vec!["END".to_string()]);
        assert_eq!(calls[1].prompt, "second prompt");
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("r");
        let provider2 = provider1.clone();

        provider1.generate("p", &opts()).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
