// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Result type for suggestion engine operations.
pub type SuggestResult<T> = Result<T, SuggestError>;

/// Errors surfaced by the suggestion engine.
///
/// All of these are contract violations by the caller. They abort the single
/// operation that produced them; the engine stays usable for the next event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestError {
    #[error("index {index} is outside of the buffer (length {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("character {0:?} is configured as both trigger and splitter")]
    OverlappingClasses(char),
    #[error("no candidate at position {index} (list holds {len})")]
    NoSuchCandidate { index: usize, len: usize },
}
