//! Token-aware chunking with sentence overlap
//!
//! The chunker turns a normalized document into an ordered sequence of
//! chunks, each within a token budget, with a whole-sentence overlap tail
//! carried from each chunk into the next so the generation provider always
//! sees grammatically complete cross-boundary context.

use crate::normalize::normalize;
use crate::sentence::split_sentences;
use crate::SummarizeError;
use precis_domain::{Chunk, ChunkSequence, EstimatingCounter, TokenBudget, TokenCounter};
use tracing::{debug, warn};

/// Splits documents into budgeted, overlapping chunks.
///
/// The counter is fixed at construction: one chunking pass never mixes an
/// exact tokenizer with the estimator, so budgets stay consistent. Chunking
/// is deterministic; the same `(text, budget)` pair always yields the same
/// sequence.
pub struct TextChunker<C> {
    budget: TokenBudget,
    counter: C,
}

impl TextChunker<EstimatingCounter> {
    /// Create a chunker backed by the character-based token estimator.
    ///
    /// This is the degraded mode used when no exact tokenizer is available.
    /// The substitution is logged, never surfaced as an error.
    pub fn with_estimator(budget: TokenBudget) -> Result<Self, SummarizeError> {
        warn!("no exact tokenizer available, using character-based token estimation");
        Self::new(budget, EstimatingCounter)
    }
}

impl<C: TokenCounter> TextChunker<C> {
    /// Create a chunker over the given budget and counter
    pub fn new(budget: TokenBudget, counter: C) -> Result<Self, SummarizeError> {
        budget.validate().map_err(SummarizeError::Config)?;
        Ok(Self { budget, counter })
    }

    /// Chunk a document.
    ///
    /// The text is normalized first. An empty (or whitespace-only) document
    /// yields zero chunks; a document within the chunk budget yields exactly
    /// one chunk containing the whole normalized text. Sentences are never
    /// dropped, truncated, or reordered: a single sentence larger than the
    /// budget is emitted as its own oversized chunk.
    pub fn chunk(&self, text: &str) -> ChunkSequence {
        let text = normalize(text);
        if text.is_empty() {
            return ChunkSequence::empty();
        }

        // Fast path: short documents skip sentence-level work entirely.
        let total_tokens = self.counter.count(&text);
        if total_tokens <= self.budget.chunk_size {
            return ChunkSequence::new(vec![Chunk {
                index: 0,
                text,
                token_count: total_tokens,
            }]);
        }

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_tokens = 0usize;

        for sentence in split_sentences(&text) {
            let sentence_tokens = self.counter.count(sentence);

            if !current.is_empty()
                && current_tokens + sentence_tokens > self.budget.chunk_size
            {
                self.close_chunk(&mut chunks, &current, current_tokens);

                // Seed the next buffer with the closed chunk's overlap tail.
                // Leading tail sentences are dropped while the tail plus the
                // incoming sentence would already overflow, so only a lone
                // oversized sentence can ever push a chunk past the budget.
                let mut tail = self.overlap_tail(&current);
                let mut tail_tokens: usize =
                    tail.iter().map(|s| self.counter.count(s)).sum();
                while let Some(first) = tail.first() {
                    if tail_tokens + sentence_tokens <= self.budget.chunk_size {
                        break;
                    }
                    tail_tokens -= self.counter.count(first);
                    tail.remove(0);
                }

                current = tail;
                current.push(sentence);
                current_tokens = tail_tokens + sentence_tokens;
            } else {
                current.push(sentence);
                current_tokens += sentence_tokens;
            }
        }

        if !current.is_empty() {
            self.close_chunk(&mut chunks, &current, current_tokens);
        }

        debug!(chunks = chunks.len(), "chunked document");
        ChunkSequence::new(chunks)
    }

    /// The budget this chunker operates under
    pub fn budget(&self) -> TokenBudget {
        self.budget
    }

    /// Close the current buffer into a chunk.
    ///
    /// `token_count` is the accumulated per-sentence count the walk budgeted
    /// with; re-counting the joined text here could drift past the budget
    /// under the estimator because joining inserts separator spaces.
    fn close_chunk(&self, chunks: &mut Vec<Chunk>, sentences: &[&str], token_count: usize) {
        chunks.push(Chunk {
            index: chunks.len(),
            text: sentences.join(" "),
            token_count,
        });
    }

    /// Longest whole-sentence suffix of a closed chunk within the overlap
    /// budget, found by walking its sentences in reverse.
    fn overlap_tail<'t>(&self, sentences: &[&'t str]) -> Vec<&'t str> {
        let mut tail: Vec<&'t str> = Vec::new();
        let mut tokens = 0usize;

        for &sentence in sentences.iter().rev() {
            let count = self.counter.count(sentence);
            if tokens + count > self.budget.overlap_size {
                break;
            }
            tail.push(sentence);
            tokens += count;
        }

        tail.reverse();
        tail
    }
}
