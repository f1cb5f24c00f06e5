//! Text normalization
//!
//! Extracted text arrives with arbitrary whitespace and stray control
//! characters. Normalization is a pure, total function: every whitespace run
//! collapses to a single space, except runs containing a paragraph break
//! (two or more newlines) which collapse to exactly two newlines. C0
//! controls, DEL, and C1 controls are stripped. No language or encoding
//! awareness beyond that.

/// Normalize raw extracted text.
///
/// Deterministic and total; the empty string is a valid input and output.
/// Leading and trailing whitespace never survives.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    let mut newlines = 0usize;

    for ch in text.chars() {
        if ch.is_whitespace() {
            in_whitespace = true;
            if ch == '\n' {
                newlines += 1;
            }
        } else if is_stripped_control(ch) {
            // Dropped without breaking a surrounding whitespace run.
        } else {
            if in_whitespace && !out.is_empty() {
                if newlines >= 2 {
                    out.push_str("\n\n");
                } else {
                    out.push(' ');
                }
            }
            in_whitespace = false;
            newlines = 0;
            out.push(ch);
        }
    }

    out
}

/// Control characters removed during normalization: C0 (other than the
/// whitespace ones, which the collapse consumes), DEL, and C1.
fn is_stripped_control(ch: char) -> bool {
    matches!(ch, '\u{0000}'..='\u{0008}' | '\u{000E}'..='\u{001F}' | '\u{000B}' | '\u{000C}')
        || matches!(ch, '\u{007F}'..='\u{009F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(normalize("a   b\t\tc"), "a b c");
    }

    #[test]
    fn test_single_newline_becomes_space() {
        assert_eq!(normalize("line one\nline two"), "line one line two");
    }

    #[test]
    fn test_paragraph_break_preserved_as_two_newlines() {
        assert_eq!(normalize("para one\n\npara two"), "para one\n\npara two");
        assert_eq!(normalize("para one\n\n\n\npara two"), "para one\n\npara two");
    }

    #[test]
    fn test_paragraph_break_with_interleaved_spaces() {
        assert_eq!(normalize("para one \n \n para two"), "para one\n\npara two");
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(normalize("a\u{0000}b\u{0007}c"), "abc");
        assert_eq!(normalize("a\u{007F}b\u{009F}c"), "abc");
    }

    #[test]
    fn test_control_characters_inside_whitespace_run() {
        // The run still collapses to one separator.
        assert_eq!(normalize("a \u{0001} b"), "a b");
    }

    #[test]
    fn test_trims_leading_and_trailing_whitespace() {
        assert_eq!(normalize("  \n hello \n\n "), "hello");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }

    #[test]
    fn test_idempotent() {
        let messy = "  First.\n\n\nSecond\tline.  \u{0003}\n End. ";
        let once = normalize(messy);
        assert_eq!(normalize(&once), once);
    }
}
