//! Error types for the summarization pipeline

use thiserror::Error;

/// Errors that can abort a summarization request.
///
/// Summarization either fully succeeds or fails atomically; every variant
/// names the stage that failed so the caller can tell a chunking problem
/// from a per-chunk generation failure from a failed reduce pass. Insight
/// extraction never appears here: it is best-effort and absorbed.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// Configuration rejected before any work started
    #[error("configuration error: {0}")]
    Config(String),

    /// Prompt template rejected (must contain exactly one insertion point)
    #[error("invalid prompt template: {0}")]
    Template(String),

    /// The chunk sequence was empty
    #[error("no chunks to summarize")]
    EmptyInput,

    /// A per-chunk generation call failed; `index` is 1-based
    #[error("generation failed for chunk {index} of {total}: {message}")]
    ChunkGeneration {
        /// 1-based position of the failed chunk
        index: usize,
        /// Total chunks in the request
        total: usize,
        /// Provider failure, rendered as text
        message: String,
    },

    /// The combine-and-resummarize call failed
    #[error("reduce generation failed: {message}")]
    ReduceGeneration {
        /// Provider failure, rendered as text
        message: String,
    },
}
