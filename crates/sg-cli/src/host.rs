// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Minimal text surface standing in for a real input widget.

use serde::Serialize;
use sg_engine::text::{char_len, check_index};
use sg_engine::{Applied, SuggestResult};

/// Buffer plus caret, both in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Surface {
    pub text: String,
    pub caret: usize,
}

impl Surface {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = char_len(&text);
        Self { text, caret }
    }

    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert one character at the caret and advance past it.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.caret);
        self.text.insert(at, c);
        self.caret += 1;
    }

    /// Delete the character before the caret. Returns false at offset 0.
    pub fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let at = self.byte_offset(self.caret - 1);
        self.text.remove(at);
        self.caret -= 1;
        true
    }

    pub fn set_caret(&mut self, caret: usize) -> SuggestResult<()> {
        check_index(caret, self.len())?;
        self.caret = caret;
        Ok(())
    }

    pub fn apply(&mut self, edit: &Applied) {
        self.text.clone_from(&edit.text);
        self.caret = edit.caret.min(self.len());
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text.char_indices().nth(chars).map_or(self.text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_engine::{SuggestError, TokenSpan};

    #[test]
    fn editing_counts_characters_not_bytes() {
        let mut surface = Surface::new("héllo");
        assert_eq!(surface.caret, 5);
        surface.set_caret(2).unwrap();
        surface.insert_char('@');
        assert_eq!(surface.text, "hé@llo");
        assert_eq!(surface.caret, 3);
        assert!(surface.backspace());
        assert!(surface.backspace());
        assert_eq!(surface.text, "hllo");
        assert_eq!(surface.caret, 1);
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut surface = Surface::new("ab");
        surface.set_caret(0).unwrap();
        assert!(!surface.backspace());
        assert_eq!(surface.text, "ab");
    }

    #[test]
    fn caret_past_the_buffer_is_rejected() {
        let mut surface = Surface::new("ab");
        surface.set_caret(0).unwrap();
        assert_eq!(
            surface.set_caret(10),
            Err(SuggestError::OutOfRange { index: 10, len: 2 })
        );
        assert_eq!(surface.caret, 0);
    }

    #[test]
    fn applying_an_edit_replaces_text_and_caret() {
        let mut surface = Surface::new("a @b c");
        surface.apply(&Applied {
            text: "a @bob c".into(),
            caret: 6,
            replaced: TokenSpan::new(2, 2),
        });
        assert_eq!(surface, Surface { text: "a @bob c".into(), caret: 6 });
    }
}
