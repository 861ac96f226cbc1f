// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::candidates::Candidate;
use crate::error::SuggestResult;
use crate::text::{TokenSpan, char_len, slice_chars};
use crate::tokenizer::Tokenizer;

/// Buffer edit produced by committing a candidate.
///
/// The host applies it as one replace plus caret move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applied {
    pub text: String,
    pub caret: usize,
    pub replaced: TokenSpan,
}

/// Replace the token under `caret` with `candidate`.
///
/// The span is recomputed from the live buffer rather than taken from the
/// session, so edits made between highlighting and committing are honoured.
pub fn apply_selection(
    tokenizer: &Tokenizer,
    buffer: &str,
    caret: usize,
    candidate: &Candidate,
) -> SuggestResult<Applied> {
    let span = tokenizer.token_area(buffer, caret)?;
    let len = char_len(buffer);

    let mut text = String::with_capacity(buffer.len() + candidate.text.len());
    text.push_str(slice_chars(buffer, 0, span.start));
    text.push_str(&candidate.text);
    text.push_str(slice_chars(buffer, span.end(), len));

    Ok(Applied {
        text,
        caret: span.start + candidate.char_len(),
        replaced: span,
    })
}
