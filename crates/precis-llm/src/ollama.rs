//! Ollama Provider Implementation
//!
//! Integration with a local Ollama instance, the sole network-calling
//! capability the summarization pipeline consumes.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama generate API
//! - Temperature, output-length, and stop-sequence mapping
//! - Startup availability check with a non-streaming model pull
//! - Retry logic with exponential backoff
//! - Timeout handling at the transport level
//!
//! # Examples
//!
//! ```no_run
//! use precis_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "tinyllama");
//! // `ensure_available` and `generate` are async; drive them from a runtime.
//! ```

use crate::GenerationError;
use precis_domain::{GenerationOptions, GenerationProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default transport timeout (5 minutes; generation on small hardware is slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaRequestOptions<'a>,
}

/// Sampling options forwarded inside a generate request
#[derive(Serialize)]
struct OllamaRequestOptions<'a> {
    temperature: f32,
    num_predict: u32,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    stop: &'a [String],
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

/// Response from the Ollama tags API
#[derive(Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModelTag>,
}

#[derive(Deserialize)]
struct OllamaModelTag {
    name: String,
}

/// Response from a non-streaming pull request
#[derive(Deserialize)]
struct OllamaPullResponse {
    #[serde(default)]
    status: String,
}

/// Response from the Ollama show API
#[derive(Deserialize)]
struct OllamaShowResponse {
    details: Option<OllamaShowDetails>,
}

#[derive(Deserialize)]
struct OllamaShowDetails {
    family: Option<String>,
    parameter_size: Option<String>,
    quantization_level: Option<String>,
}

/// Information about the configured model, as reported by the provider
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name as configured
    pub name: String,
    /// Model family (e.g. "llama")
    pub family: Option<String>,
    /// Parameter count (e.g. "1.1B")
    pub parameter_size: Option<String>,
    /// Quantization level (e.g. "Q4_0")
    pub quantization: Option<String>,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: model to use (e.g., "tinyllama", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider against `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Replace the transport timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder().timeout(timeout).build().unwrap();
        self
    }

    /// The model this provider is configured for
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Verify the provider is usable, pulling the model if it is missing.
    ///
    /// Called once at service initialization. Failure here is fatal to the
    /// caller's setup and is never retried by the pipeline.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Configuration`] if Ollama is unreachable
    /// - [`GenerationError::ModelNotAvailable`] if the model is missing and
    ///   cannot be pulled
    pub async fn ensure_available(&self) -> Result<(), GenerationError> {
        let models = self.list_models().await.map_err(|e| {
            GenerationError::Configuration(format!(
                "cannot connect to Ollama at {}: {}",
                self.endpoint, e
            ))
        })?;

        let latest = format!("{}:latest", self.model);
        if models.iter().any(|m| *m == self.model || *m == latest) {
            info!(model = %self.model, "Ollama model is available");
            return Ok(());
        }

        warn!(
            model = %self.model,
            available = ?models,
            "model not found, attempting to pull"
        );
        self.pull_model().await?;
        info!(model = %self.model, "model pulled successfully");
        Ok(())
    }

    /// Cheap liveness probe against the tags endpoint
    pub async fn health_check(&self) -> Result<(), GenerationError> {
        self.list_models().await.map(|_| ())
    }

    /// Query the provider for details about the configured model
    pub async fn model_info(&self) -> Result<ModelInfo, GenerationError> {
        let url = format!("{}/api/show", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "name": self.model }))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(format!("show request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GenerationError::ModelNotAvailable(self.model.clone()));
        }

        let show: OllamaShowResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("show response: {}", e)))?;

        let details = show.details;
        Ok(ModelInfo {
            name: self.model.clone(),
            family: details.as_ref().and_then(|d| d.family.clone()),
            parameter_size: details.as_ref().and_then(|d| d.parameter_size.clone()),
            quantization: details.and_then(|d| d.quantization_level),
        })
    }

    /// Generate text using the Ollama API
    ///
    /// # Errors
    ///
    /// Returns an error if Ollama is not running, the model is missing, the
    /// network call fails after all retries, or the response carries no text.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaRequestOptions {
                temperature: options.temperature,
                num_predict: options.max_output_tokens,
                stop: &options.stop_sequences,
            },
        };

        // Retry with exponential backoff; 404 and malformed bodies are not
        // retryable, transport failures and 5xx are.
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        let parsed: OllamaGenerateResponse =
                            response.json().await.map_err(|e| {
                                GenerationError::InvalidResponse(format!(
                                    "failed to parse response: {}",
                                    e
                                ))
                            })?;

                        let text = parsed.response.trim();
                        if text.is_empty() {
                            return Err(GenerationError::EmptyResponse);
                        }
                        debug!(chars = text.len(), "generation call completed");
                        return Ok(text.to_string());
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(GenerationError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(GenerationError::Transport(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error =
                        Some(GenerationError::Transport(format!("request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| GenerationError::Transport("max retries exceeded".to_string())))
    }

    async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let url = format!("{}/api/tags", self.endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(format!("tags request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GenerationError::Transport(format!(
                "tags endpoint returned HTTP {}",
                response.status()
            )));
        }

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("tags response: {}", e)))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn pull_model(&self) -> Result<(), GenerationError> {
        let url = format!("{}/api/pull", self.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "name": self.model, "stream": false }))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(format!("pull request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GenerationError::ModelNotAvailable(self.model.clone()));
        }

        let pull: OllamaPullResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("pull response: {}", e)))?;

        if pull.status == "success" {
            Ok(())
        } else {
            Err(GenerationError::ModelNotAvailable(format!(
                "{} (pull status: {})",
                self.model, pull.status
            )))
        }
    }
}

impl GenerationProvider for OllamaProvider {
    type Error = GenerationError;

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, Self::Error> {
        OllamaProvider::generate(self, prompt, options).await
    }
}
