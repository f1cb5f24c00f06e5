//! Configuration for the summarization pipeline

use precis_domain::{GenerationOptions, TokenBudget};
use serde::{Deserialize, Serialize};

/// Size limits for one document.
///
/// `max_pages` belongs to the upstream extraction layer (which turns a
/// document container into raw text); it is carried here so a single config
/// section covers the whole document pipeline, but the chunker never reads
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLimits {
    /// Maximum tokens per chunk sent to the generation provider
    pub chunk_size: usize,
    /// Maximum tokens of trailing context carried into the next chunk
    pub overlap_size: usize,
    /// Page ceiling enforced by the extraction layer
    pub max_pages: usize,
}

impl Default for DocumentLimits {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap_size: 100,
            max_pages: 50,
        }
    }
}

/// Configuration for the summarization pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Sampling temperature for map and reduce summarization calls
    pub summary_temperature: f32,

    /// Sampling temperature for the insight-extraction call (lower, to bias
    /// toward extractive output)
    pub insight_temperature: f32,

    /// Output-token target for each per-chunk summarization call
    pub map_output_tokens: u32,

    /// Output-token target for the combine-and-resummarize call; kept below
    /// the map target so the reduce pass condenses rather than expands
    pub reduce_output_tokens: u32,

    /// Output-token target for the insight-extraction call
    pub insight_output_tokens: u32,

    /// Stop sequences applied to summarization calls
    pub stop_sequences: Vec<String>,

    /// Document size limits (kept last so TOML serialization emits scalar
    /// values before the table)
    pub documents: DocumentLimits,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            summary_temperature: 0.7,
            insight_temperature: 0.3,
            map_output_tokens: 400,
            reduce_output_tokens: 300,
            insight_output_tokens: 200,
            stop_sequences: vec!["\n\n\n".to_string(), "END_SUMMARY".to_string()],
            documents: DocumentLimits::default(),
        }
    }
}

impl SummarizerConfig {
    /// The token budget the chunker operates under
    pub fn budget(&self) -> TokenBudget {
        TokenBudget::new(self.documents.chunk_size, self.documents.overlap_size)
    }

    /// Options for a per-chunk summarization call
    pub fn map_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.summary_temperature,
            max_output_tokens: self.map_output_tokens,
            stop_sequences: self.stop_sequences.clone(),
        }
    }

    /// Options for the combine-and-resummarize call
    pub fn reduce_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.summary_temperature,
            max_output_tokens: self.reduce_output_tokens,
            stop_sequences: self.stop_sequences.clone(),
        }
    }

    /// Options for the insight-extraction call
    pub fn insight_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.insight_temperature,
            max_output_tokens: self.insight_output_tokens,
            stop_sequences: Vec::new(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.budget().validate()?;
        if self.map_output_tokens == 0 {
            return Err("map_output_tokens must be greater than 0".to_string());
        }
        if self.reduce_output_tokens == 0 {
            return Err("reduce_output_tokens must be greater than 0".to_string());
        }
        if self.reduce_output_tokens >= self.map_output_tokens {
            return Err(
                "reduce_output_tokens must be smaller than map_output_tokens".to_string(),
            );
        }
        if self.insight_output_tokens == 0 {
            return Err("insight_output_tokens must be greater than 0".to_string());
        }
        for (name, value) in [
            ("summary_temperature", self.summary_temperature),
            ("insight_temperature", self.insight_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(format!("{} must be within [0.0, 2.0]", name));
            }
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SummarizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overlap_must_stay_below_chunk_size() {
        let mut config = SummarizerConfig::default();
        config.documents.overlap_size = config.documents.chunk_size;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reduce_target_must_stay_below_map_target() {
        let mut config = SummarizerConfig::default();
        config.reduce_output_tokens = config.map_output_tokens;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_temperature_range_enforced() {
        let mut config = SummarizerConfig::default();
        config.summary_temperature = 2.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_insight_options_use_lower_temperature() {
        let config = SummarizerConfig::default();
        assert!(config.insight_options().temperature < config.map_options().temperature);
        assert!(config.insight_options().stop_sequences.is_empty());
    }

    #[test]
    fn test_reduce_target_lower_than_map_target_by_default() {
        let config = SummarizerConfig::default();
        assert!(
            config.reduce_options().max_output_tokens < config.map_options().max_output_tokens
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SummarizerConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = SummarizerConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.documents.chunk_size, parsed.documents.chunk_size);
        assert_eq!(config.documents.overlap_size, parsed.documents.overlap_size);
        assert_eq!(config.map_output_tokens, parsed.map_output_tokens);
        assert_eq!(config.stop_sequences, parsed.stop_sequences);
    }
}
