// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Character-level text primitives shared by the tokenizer and the commit path.
//!
//! Offsets are counted in `char`s. Hosts that track carets in bytes or UTF-16
//! code units must convert before calling into the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{SuggestError, SuggestResult};

pub const DEFAULT_TRIGGERS: &[char] = &['@', '#'];

pub const DEFAULT_SPLITTERS: &[char] = &[
    ' ', '\t', '\n', '\r', '\u{3000}', '.', ',', ':', ';', '!', '?', '(', ')', '[', ']', '{', '}',
    '"', '\'',
];

/// Half-open `[start, start + len)` range of the active token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TokenSpan {
    pub start: usize,
    pub len: usize,
}

impl TokenSpan {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The two disjoint character classes that delimit tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClasses {
    triggers: BTreeSet<char>,
    splitters: BTreeSet<char>,
}

impl CharClasses {
    pub fn new(
        triggers: impl IntoIterator<Item = char>,
        splitters: impl IntoIterator<Item = char>,
    ) -> SuggestResult<Self> {
        let triggers: BTreeSet<char> = triggers.into_iter().collect();
        let splitters: BTreeSet<char> = splitters.into_iter().collect();
        if let Some(&shared) = triggers.intersection(&splitters).next() {
            return Err(SuggestError::OverlappingClasses(shared));
        }
        Ok(Self {
            triggers,
            splitters,
        })
    }

    pub fn is_trigger(&self, c: char) -> bool {
        self.triggers.contains(&c)
    }

    pub fn is_splitter(&self, c: char) -> bool {
        self.splitters.contains(&c)
    }

    /// True for any character that ends a forward token scan.
    pub fn is_boundary(&self, c: char) -> bool {
        self.is_trigger(c) || self.is_splitter(c)
    }

    pub fn triggers(&self) -> impl Iterator<Item = char> + '_ {
        self.triggers.iter().copied()
    }

    pub fn splitters(&self) -> impl Iterator<Item = char> + '_ {
        self.splitters.iter().copied()
    }
}

impl Default for CharClasses {
    fn default() -> Self {
        Self {
            triggers: DEFAULT_TRIGGERS.iter().copied().collect(),
            splitters: DEFAULT_SPLITTERS.iter().copied().collect(),
        }
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn check_index(index: usize, len: usize) -> SuggestResult<()> {
    if index > len {
        return Err(SuggestError::OutOfRange { index, len });
    }
    Ok(())
}

/// Character at char offset `index`, if any.
pub fn char_at(text: &str, index: usize) -> Option<char> {
    text.chars().nth(index)
}

/// Slice `text` by char offsets. Callers guarantee `start <= end <= char_len(text)`.
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let lo = byte_offset(text, start);
    let hi = byte_offset(text, end);
    &text[lo..hi]
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices().nth(char_index).map(|(byte, _)| byte).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_classes_are_rejected() {
        let err = CharClasses::new(['@', ' '], [' ']).unwrap_err();
        assert_eq!(err, SuggestError::OverlappingClasses(' '));
    }

    #[test]
    fn default_classes_are_disjoint() {
        let classes = CharClasses::default();
        assert!(classes.triggers().all(|c| !classes.is_splitter(c)));
        assert!(classes.is_trigger('@'));
        assert!(classes.is_splitter('\u{3000}'));
    }

    #[test]
    fn slicing_respects_multibyte_characters() {
        let text = "こんにちは @世界";
        assert_eq!(char_len(text), 9);
        assert_eq!(slice_chars(text, 6, 9), "@世界");
        assert_eq!(slice_chars(text, 9, 9), "");
        assert_eq!(char_at(text, 6), Some('@'));
        assert_eq!(char_at(text, 9), None);
    }

    #[test]
    fn check_index_allows_the_end_position() {
        assert!(check_index(3, 3).is_ok());
        assert_eq!(
            check_index(4, 3),
            Err(SuggestError::OutOfRange { index: 4, len: 3 })
        );
    }
}
