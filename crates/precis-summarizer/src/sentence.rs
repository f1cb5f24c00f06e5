//! Heuristic sentence splitting
//!
//! A boundary is any `.`, `!`, or `?` followed by whitespace. This is a
//! heuristic, not a grammar: abbreviations like "e.g. " split too. The
//! chunker only needs stable, order-preserving units, so that trade-off is
//! acceptable and documented.

/// Split text into sentence-like units.
///
/// Returns a lazy iterator borrowing from `text`; calling it again on the
/// same input restarts and yields the identical sequence. Fragments that are
/// empty after trimming are discarded, and units are never reordered or
/// merged.
pub fn split_sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text }
}

/// Iterator over sentence-like units of a text. See [`split_sentences`].
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if self.rest.is_empty() {
                return None;
            }

            let mut split_at = self.rest.len();
            let mut chars = self.rest.char_indices().peekable();
            while let Some((_, ch)) = chars.next() {
                if matches!(ch, '.' | '!' | '?') {
                    if let Some(&(next_idx, next_ch)) = chars.peek() {
                        if next_ch.is_whitespace() {
                            split_at = next_idx;
                            break;
                        }
                    }
                }
            }

            let (head, tail) = self.rest.split_at(split_at);
            self.rest = tail;

            let sentence = head.trim();
            if !sentence.is_empty() {
                return Some(sentence);
            }
            // Whitespace-only fragment: keep scanning.
        }
    }
}
