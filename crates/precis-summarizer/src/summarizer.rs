//! Map-reduce summarization orchestration

use crate::config::SummarizerConfig;
use crate::error::SummarizeError;
use crate::insights::{insight_prompt, parse_insights};
use crate::prompt::{PromptTemplate, REDUCE_INSTRUCTION};
use crate::types::{Insight, SummaryResult};
use precis_domain::{ChunkSequence, GenerationOptions, GenerationProvider};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives the generation provider across a chunk sequence and reduces the
/// partial summaries into one result.
///
/// Calls are issued strictly one after another: the provider is typically a
/// single local inference engine, so parallel prompts only contend for its
/// memory, and sequential order keeps runs reproducible. Each request owns
/// its chunk sequence; the summarizer holds no per-request state, so
/// independent requests may interleave freely at the scheduler level.
pub struct Summarizer<P> {
    provider: P,
    config: SummarizerConfig,
}

impl<P: GenerationProvider> Summarizer<P> {
    /// Create a summarizer, validating the configuration up front
    pub fn new(provider: P, config: SummarizerConfig) -> Result<Self, SummarizeError> {
        config.validate().map_err(SummarizeError::Config)?;
        Ok(Self { provider, config })
    }

    /// The active configuration
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarize a chunk sequence.
    ///
    /// A single chunk is summarized with one generation call whose output is
    /// the final summary. Multiple chunks each get one call with the same
    /// template, then the partial summaries are combined (double-newline
    /// separated, in order) and condensed by one reduce call with a lower
    /// output target. Any generation failure aborts the whole operation with
    /// the failed stage; no partial result is ever returned. Insight
    /// extraction afterwards is best-effort and cannot fail the request.
    pub async fn summarize(
        &self,
        chunks: &ChunkSequence,
        template: &PromptTemplate,
    ) -> Result<SummaryResult, SummarizeError> {
        if chunks.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let start = Instant::now();
        let total = chunks.len();

        let summary = if total == 1 {
            let only = chunks.iter().next().ok_or(SummarizeError::EmptyInput)?;
            self.call(&template.render(&only.text), &self.config.map_options())
                .await
                .map_err(|message| SummarizeError::ChunkGeneration {
                    index: 1,
                    total,
                    message,
                })?
        } else {
            let mut partials = Vec::with_capacity(total);
            for chunk in chunks {
                info!(chunk = chunk.index + 1, total, "summarizing chunk");
                let partial = self
                    .call(&template.render(&chunk.text), &self.config.map_options())
                    .await
                    .map_err(|message| SummarizeError::ChunkGeneration {
                        index: chunk.index + 1,
                        total,
                        message,
                    })?;
                partials.push(partial);
            }

            let combined = partials.join("\n\n");
            let reduce_prompt = format!("{}\n\n{}", REDUCE_INSTRUCTION, combined);
            debug!(partials = partials.len(), "reducing partial summaries");
            self.call(&reduce_prompt, &self.config.reduce_options())
                .await
                .map_err(|message| SummarizeError::ReduceGeneration { message })?
        };

        let insights = self.extract_insights(&summary).await;

        let processing_time = start.elapsed();
        info!(
            chunks = total,
            elapsed_ms = processing_time.as_millis() as u64,
            "summarization completed"
        );

        Ok(SummaryResult {
            summary,
            insights,
            processing_time,
            chunks_processed: total,
        })
    }

    /// Extract up to five insights from a summary.
    ///
    /// One generation call at a lower temperature than summarization. Every
    /// failure mode — transport error, empty response, unparseable output —
    /// is absorbed: the caller always gets a non-empty list, falling back to
    /// the placeholder insight.
    pub async fn extract_insights(&self, summary: &str) -> Vec<Insight> {
        let prompt = insight_prompt(summary);

        match self
            .provider
            .generate(&prompt, &self.config.insight_options())
            .await
        {
            Ok(response) => {
                let insights = parse_insights(&response);
                if insights.is_empty() {
                    warn!("insight response contained no usable text");
                    vec![Insight::unavailable()]
                } else {
                    insights
                }
            }
            Err(e) => {
                warn!(error = %e, "insight extraction failed");
                vec![Insight::unavailable()]
            }
        }
    }

    /// Issue one generation call, treating an empty response as a failure
    async fn call(&self, prompt: &str, options: &GenerationOptions) -> Result<String, String> {
        match self.provider.generate(prompt, options).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Err("provider returned an empty response".to_string())
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Err(e) => Err(e.to_string()),
        }
    }
}
