// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Token boundary detection.
//!
//! A token is the run of characters around the caret that is delimited by
//! trigger and splitter characters. A trigger character opens a token and is
//! kept as its first character; a splitter closes a token and is never part of
//! it. Spans are recomputed on every query because a token that touches the end
//! of the buffer keeps growing as text is appended.

use crate::error::{SuggestError, SuggestResult};
use crate::text::{CharClasses, TokenSpan, char_len, check_index, slice_chars};

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    classes: CharClasses,
}

impl Tokenizer {
    pub fn new(classes: CharClasses) -> Self {
        Self { classes }
    }

    pub fn is_trigger(&self, c: char) -> bool {
        self.classes.is_trigger(c)
    }

    pub fn is_splitter(&self, c: char) -> bool {
        self.classes.is_splitter(c)
    }

    /// Locate the token that continues from the character just before `index`.
    ///
    /// Scans backwards for the nearest trigger (included in the span) or
    /// splitter (excluded), then forwards until the next trigger, splitter or
    /// end of text.
    pub fn token_area(&self, text: &str, index: usize) -> SuggestResult<TokenSpan> {
        let chars: Vec<char> = text.chars().collect();
        check_index(index, chars.len())?;

        let mut pos = index;
        let mut len = 0;
        while pos > 0 {
            pos -= 1;
            let c = chars[pos];
            if self.classes.is_trigger(c) {
                len = 1;
                break;
            }
            if self.classes.is_splitter(c) {
                pos += 1;
                break;
            }
        }

        while pos + len < chars.len() && !self.classes.is_boundary(chars[pos + len]) {
            len += 1;
        }

        Ok(TokenSpan::new(pos, len))
    }

    /// Text covered by `span`.
    ///
    /// A span reaching the end of `text` extends to the current end of text,
    /// which picks up characters appended after the span was computed.
    pub fn token_text(&self, span: TokenSpan, text: &str) -> SuggestResult<String> {
        let len = char_len(text);
        if span.start > len {
            return Err(SuggestError::OutOfRange {
                index: span.start,
                len,
            });
        }
        if span.end() >= len {
            return Ok(slice_chars(text, span.start, len).to_string());
        }
        if span.is_empty() {
            return Ok(String::new());
        }
        Ok(slice_chars(text, span.start, span.end()).to_string())
    }

    pub fn token_at(&self, text: &str, index: usize) -> SuggestResult<String> {
        let span = self.token_area(text, index)?;
        self.token_text(span, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(CharClasses::new(['@'], [' ']).unwrap())
    }

    #[test]
    fn trigger_token_at_end_of_text() {
        let t = tokenizer();
        let span = t.token_area("hello @wor", 10).unwrap();
        assert_eq!(span, TokenSpan::new(6, 4));
        assert_eq!(t.token_text(span, "hello @wor").unwrap(), "@wor");
    }

    #[test]
    fn caret_in_the_middle_of_a_token_sees_the_whole_run() {
        let t = tokenizer();
        assert_eq!(t.token_area("a @bob c", 4).unwrap(), TokenSpan::new(2, 4));
        assert_eq!(t.token_at("a @bob c", 4).unwrap(), "@bob");
    }

    #[test]
    fn token_after_splitter_excludes_it() {
        let t = tokenizer();
        assert_eq!(t.token_area("one two", 6).unwrap(), TokenSpan::new(4, 3));
        assert_eq!(t.token_at("one two", 6).unwrap(), "two");
    }

    #[test]
    fn empty_token_right_after_splitter() {
        let t = tokenizer();
        let span = t.token_area("one  two", 4).unwrap();
        assert_eq!(span, TokenSpan::new(4, 0));
        assert_eq!(t.token_text(span, "one  two").unwrap(), "");
    }

    #[test]
    fn backward_scan_without_delimiters_starts_at_zero() {
        let t = tokenizer();
        assert_eq!(t.token_area("plain", 3).unwrap(), TokenSpan::new(0, 5));
        assert_eq!(t.token_area("plain", 0).unwrap(), TokenSpan::new(0, 5));
    }

    #[test]
    fn forward_scan_stops_at_next_trigger() {
        let t = tokenizer();
        assert_eq!(t.token_area("@ab@cd", 2).unwrap(), TokenSpan::new(0, 3));
        assert_eq!(t.token_area("@ab@cd", 5).unwrap(), TokenSpan::new(3, 3));
    }

    #[test]
    fn index_past_end_is_out_of_range() {
        let t = tokenizer();
        assert_eq!(
            t.token_area("abc", 4),
            Err(SuggestError::OutOfRange { index: 4, len: 3 })
        );
    }

    #[test]
    fn span_touching_end_of_text_runs_to_current_end() {
        let t = tokenizer();
        let span = t.token_area("hi @ab", 6).unwrap();
        assert_eq!(span, TokenSpan::new(3, 3));
        assert_eq!(t.token_text(span, "hi @a").unwrap(), "@a");
    }

    #[test]
    fn span_beyond_text_is_out_of_range() {
        let t = tokenizer();
        assert_eq!(
            t.token_text(TokenSpan::new(9, 0), "abc"),
            Err(SuggestError::OutOfRange { index: 9, len: 3 })
        );
    }

    #[test]
    fn offsets_are_counted_in_characters() {
        let t = tokenizer();
        let text = "日本 @東京";
        assert_eq!(t.token_area(text, 5).unwrap(), TokenSpan::new(3, 3));
        assert_eq!(t.token_at(text, 5).unwrap(), "@東京");
    }
}
