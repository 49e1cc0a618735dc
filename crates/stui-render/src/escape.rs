#![forbid(unsafe_code)]

//! Escape-code scanning.
//!
//! Finds the control sequences embedded in a piece of text, removes them, and
//! puts them back. Everything here is a pure function of its input.
//!
//! # Grammar
//!
//! | Form | Bytes |
//! |------|-------|
//! | Fe | `ESC` + one of `0x40..=0x5A`, `0x5C..=0x5F` |
//! | CSI | `ESC [` + params `0x30..=0x3F`* + intermediates `0x20..=0x2F`* + final `0x40..=0x7E` |
//!
//! An `ESC` that starts neither form stays in the text as a literal byte.
//!
//! # Design Notes
//!
//! - [`strip`] and [`scan`] are both views of one left-to-right pass
//!   ([`split`]), so they can never disagree on what counts as a sequence.
//! - Token offsets are byte offsets into the *stripped* text. Every sequence
//!   is pure ASCII, so offsets always fall on char boundaries.
//! - [`reinsert`] applies tokens from the highest offset to the lowest;
//!   inserting front to back would shift the offsets still to be applied.

use std::ops::Range;

/// The escape byte that starts every control sequence.
pub const ESC: u8 = 0x1b;

/// A control sequence and where it sits in the stripped text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EscapeToken {
    /// Byte offset into the stripped text.
    pub offset: usize,
    /// The full sequence, `ESC` included.
    pub code: String,
}

impl EscapeToken {
    /// Build a token.
    pub fn new(offset: usize, code: impl Into<String>) -> Self {
        Self {
            offset,
            code: code.into(),
        }
    }
}

#[inline]
const fn is_fe(byte: u8) -> bool {
    matches!(byte, 0x40..=0x5A | 0x5C..=0x5F)
}

/// Length of the sequence starting at `bytes[0]` (which must be `ESC`).
fn sequence_len(bytes: &[u8]) -> Option<usize> {
    match bytes.get(1).copied()? {
        b'[' => {
            let mut i = 2;
            while bytes.get(i).is_some_and(|b| (0x30..=0x3F).contains(b)) {
                i += 1;
            }
            while bytes.get(i).is_some_and(|b| (0x20..=0x2F).contains(b)) {
                i += 1;
            }
            bytes
                .get(i)
                .is_some_and(|b| (0x40..=0x7E).contains(b))
                .then_some(i + 1)
        }
        b if is_fe(b) => Some(2),
        _ => None,
    }
}

/// Iterator over the byte ranges of recognized sequences.
#[derive(Debug, Clone)]
pub struct Sequences<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for Sequences<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        while self.pos < self.bytes.len() {
            let start = self.pos + memchr::memchr(ESC, &self.bytes[self.pos..])?;
            match sequence_len(&self.bytes[start..]) {
                Some(len) => {
                    self.pos = start + len;
                    return Some(start..start + len);
                }
                None => self.pos = start + 1,
            }
        }
        None
    }
}

/// Byte ranges of every sequence in `text`, left to right.
#[must_use]
pub fn find_sequences(text: &str) -> Sequences<'_> {
    Sequences {
        bytes: text.as_bytes(),
        pos: 0,
    }
}

/// Whether `text` holds at least one recognized sequence.
#[must_use]
pub fn contains_sequence(text: &str) -> bool {
    find_sequences(text).next().is_some()
}

/// Strip and scan in a single pass.
///
/// Returns the plain text and the tokens in ascending offset order.
#[must_use]
pub fn split(text: &str) -> (String, Vec<EscapeToken>) {
    let mut plain = String::with_capacity(text.len());
    let mut tokens = Vec::new();
    let mut last = 0;
    for range in find_sequences(text) {
        plain.push_str(&text[last..range.start]);
        tokens.push(EscapeToken::new(plain.len(), &text[range.clone()]));
        last = range.end;
    }
    plain.push_str(&text[last..]);
    (plain, tokens)
}

/// `text` with every recognized sequence removed.
#[must_use]
pub fn strip(text: &str) -> String {
    split(text).0
}

/// The sequences in `text` with their offsets into [`strip`]`(text)`.
#[must_use]
pub fn scan(text: &str) -> Vec<EscapeToken> {
    split(text).1
}

/// Insert `tokens` back into `plain`.
///
/// Tokens whose offset lies past the end of `plain` (because the text was
/// clipped) are dropped. `tokens` must be in ascending offset order, as
/// [`scan`] returns them.
///
/// # Panics
///
/// Panics if a kept offset is not on a char boundary of `plain`.
#[must_use]
pub fn reinsert(plain: &str, tokens: &[EscapeToken]) -> String {
    let extra: usize = tokens.iter().map(|t| t.code.len()).sum();
    let mut out = String::with_capacity(plain.len() + extra);
    out.push_str(plain);
    for token in tokens.iter().rev() {
        if token.offset <= plain.len() {
            out.insert_str(token.offset, &token.code);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_sequences() {
        assert_eq!(split("hello"), ("hello".to_owned(), Vec::new()));
        assert!(!contains_sequence("hello"));
    }

    #[test]
    fn sgr_sequences_are_found() {
        let text = "\x1b[1m\x1b[34mx\x1b[0m";
        assert_eq!(strip(text), "x");
        assert_eq!(
            scan(text),
            vec![
                EscapeToken::new(0, "\x1b[1m"),
                EscapeToken::new(0, "\x1b[34m"),
                EscapeToken::new(1, "\x1b[0m"),
            ]
        );
    }

    #[test]
    fn fe_sequences_are_two_bytes() {
        assert_eq!(scan("a\x1bMb"), vec![EscapeToken::new(1, "\x1bM")]);
        assert_eq!(strip("a\x1b\\b"), "ab");
    }

    #[test]
    fn csi_with_intermediates() {
        let text = "\x1b[?25l\x1b[1 q.";
        assert_eq!(strip(text), ".");
        assert_eq!(scan(text).len(), 2);
    }

    #[test]
    fn unmatched_escape_stays_literal() {
        assert_eq!(strip("a\x1b"), "a\x1b");
        assert_eq!(strip("a\x1bxb"), "a\x1bxb");
        assert_eq!(strip("\x1b[12"), "\x1b[12");
        // A broken sequence does not swallow the valid one after it.
        assert_eq!(strip("\x1b[\x1b[0m!"), "\x1b[!");
    }

    #[test]
    fn offsets_are_bytes_into_the_stripped_text() {
        let text = "é\x1b[4mü";
        assert_eq!(scan(text), vec![EscapeToken::new(2, "\x1b[4m")]);
    }

    #[test]
    fn reinsert_round_trips() {
        let text = "ab\x1b[31mcd\x1b[0m\x1b[1mef\x1b[0m";
        let (plain, tokens) = split(text);
        assert_eq!(reinsert(&plain, &tokens), text);
    }

    #[test]
    fn reinsert_drops_tokens_past_the_end() {
        let tokens = scan("ab\x1b[31mcd\x1b[0m");
        assert_eq!(reinsert("ab", &tokens), "ab\x1b[31m");
        assert_eq!(reinsert("a", &tokens), "a");
    }

    #[test]
    fn find_sequences_returns_ranges() {
        let ranges: Vec<_> = find_sequences("x\x1b[0my\x1bZ").collect();
        assert_eq!(ranges, vec![1..5, 6..8]);
    }
}
