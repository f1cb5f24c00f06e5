//! Chunks and chunk sequences

/// One bounded-size slice of document text, sent as a single generation
/// prompt.
///
/// The token count is measured at creation time with the same counter used
/// for the whole chunking pass. It stays within the budget's `chunk_size`
/// except for the pathological case of a single sentence that exceeds the
/// budget on its own, which is emitted as its own oversized chunk rather
/// than dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based position within the sequence
    pub index: usize,
    /// The chunk's text payload
    pub text: String,
    /// Token count of `text` at creation time
    pub token_count: usize,
}

/// The ordered, immutable list of chunks created for one document.
///
/// A sequence is built once per summarization request and never mutated or
/// shared across requests afterwards; it only exposes read access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSequence {
    chunks: Vec<Chunk>,
}

impl ChunkSequence {
    /// Create a sequence from already-ordered chunks
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// The empty sequence (an empty document yields zero chunks)
    pub fn empty() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the sequence contains no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Get a chunk by position
    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Iterate over the chunks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Borrow the chunk texts in order
    pub fn texts(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.text.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ChunkSequence {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: usize, text: &str) -> Chunk {
        Chunk {
            index,
            text: text.to_string(),
            token_count: text.len() / 4,
        }
    }

    #[test]
    fn test_empty_sequence() {
        let seq = ChunkSequence::empty();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert!(seq.get(0).is_none());
    }

    #[test]
    fn test_order_preserved() {
        let seq = ChunkSequence::new(vec![chunk(0, "first"), chunk(1, "second")]);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(0).unwrap().text, "first");
        assert_eq!(seq.get(1).unwrap().text, "second");

        let texts: Vec<&str> = seq.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_texts_borrows_in_order() {
        let seq = ChunkSequence::new(vec![chunk(0, "a"), chunk(1, "b"), chunk(2, "c")]);
        assert_eq!(seq.texts(), vec!["a", "b", "c"]);
    }
}
