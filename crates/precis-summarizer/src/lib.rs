//! Precis Summarizer
//!
//! Bounded map-reduce summarization of arbitrarily long documents through a
//! size-limited generation provider.
//!
//! # Overview
//!
//! The pipeline normalizes extracted text, splits it into sentence-like
//! units, packs those into token-budgeted chunks with a whole-sentence
//! overlap tail between neighbors, summarizes each chunk sequentially, and
//! reduces the partial summaries into one final summary plus a short list of
//! bullet insights.
//!
//! # Architecture
//!
//! ```text
//! Text → normalize → split_sentences → TextChunker → Summarizer → LLM
//!                                                        ↓
//!                                         SummaryResult + insights
//! ```
//!
//! # Key Properties
//!
//! - **Deterministic chunking**: the same `(text, budget)` pair always
//!   yields the same chunk sequence; one pass never mixes token counters
//! - **No silent loss**: sentences are never dropped or truncated; an
//!   oversized sentence becomes its own oversized chunk
//! - **Atomic failure**: a generation failure at any summarization stage
//!   aborts the request with that stage identified; no partial summaries
//! - **Best-effort insights**: insight extraction absorbs every failure and
//!   can never fail an otherwise-successful summarization
//!
//! # Example Usage
//!
//! ```
//! use precis_summarizer::{PromptTemplate, Summarizer, SummarizerConfig, TextChunker};
//! use precis_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SummarizerConfig::default();
//! let chunker = TextChunker::with_estimator(config.budget())?;
//! let chunks = chunker.chunk("A short report. Nothing unusual happened.");
//!
//! let provider = MockProvider::new("A quiet day, per the report.");
//! let summarizer = Summarizer::new(provider, config)?;
//!
//! let result = summarizer
//!     .summarize(&chunks, &PromptTemplate::general())
//!     .await?;
//!
//! println!("{} ({} chunks)", result.summary, result.chunks_processed);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod insights;
mod normalize;
mod prompt;
mod sentence;
mod summarizer;
mod types;


pub use chunking::TextChunker;
pub use config::{DocumentLimits, SummarizerConfig};
pub use error::SummarizeError;
pub use insights::parse_insights;
pub use normalize::normalize;
pub use prompt::{PromptTemplate, INSERTION_POINT};
pub use sentence::{split_sentences, Sentences};
pub use summarizer::Summarizer;
pub use types::{Insight, SummaryResult, MAX_INSIGHTS};
