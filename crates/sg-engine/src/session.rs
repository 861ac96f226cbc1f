// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::Serialize;

use crate::candidates::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Closed,
    Open,
}

/// Why the last session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloseReason {
    /// The caret moved before the first character after the trigger.
    CaretBeforeToken,
    /// An edit or caret move left the character run the session was opened on.
    LeftToken,
    /// The source returned nothing for the current token.
    NoCandidates,
    /// The token is longer than every remaining candidate.
    TokenOvergrown,
    /// The host closed the popup (focus loss and the like).
    Dismissed,
    Cancelled,
    Committed,
}

impl CloseReason {
    /// Closures driven by the buffer or the host rather than a user command.
    pub fn is_invalidation(self) -> bool {
        !matches!(self, CloseReason::Cancelled | CloseReason::Committed)
    }
}

/// Snapshot of the suggestion session exposed to the host for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub(crate) state: SessionState,
    pub(crate) token_start: usize,
    pub(crate) current_token: String,
    pub(crate) filtered: Vec<Candidate>,
    pub(crate) selected: Option<usize>,
}

impl Session {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// First buffer offset that still belongs to the session's token.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    pub fn current_token(&self) -> &str {
        &self.current_token
    }

    pub fn filtered(&self) -> &[Candidate] {
        &self.filtered
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.and_then(|i| self.filtered.get(i))
    }

    pub(crate) fn reset(&mut self) {
        self.state = SessionState::Closed;
        self.current_token.clear();
        self.filtered.clear();
        self.selected = None;
    }

    /// Move the highlight one entry down, stopping at the last entry.
    pub(crate) fn select_next(&mut self) {
        if self.filtered.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.filtered.len() - 1;
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    /// Move the highlight one entry up, stopping at the first entry.
    pub(crate) fn select_previous(&mut self) {
        if self.filtered.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }
}
