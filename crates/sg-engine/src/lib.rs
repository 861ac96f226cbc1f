// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Inline suggestion engine for free-form text inputs.
//!
//! Given a buffer snapshot, a caret and a [`CandidateSource`], the engine finds
//! the token under the caret, keeps a filtered candidate list while the user
//! types, picks a default highlight and turns a commit into one buffer edit.
//! It owns no text and does no I/O; the host surface feeds it events and
//! applies the edits it returns.

pub mod apply;
pub mod candidates;
pub mod engine;
pub mod error;
pub mod keys;
pub mod matcher;
pub mod session;
pub mod text;
pub mod tokenizer;

pub use apply::{Applied, apply_selection};
pub use candidates::{Candidate, CandidateSource, FuzzyCandidates, StaticCandidates};
pub use engine::{EngineOptions, SuggestEngine};
pub use error::{SuggestError, SuggestResult};
pub use keys::{KeyOutcome, SuggestKey};
pub use matcher::{DEFAULT_NEAR_MATCH_THRESHOLD, NearMatcher, is_near_match};
pub use session::{CloseReason, Session, SessionState};
pub use text::{CharClasses, TokenSpan};
pub use tokenizer::Tokenizer;
