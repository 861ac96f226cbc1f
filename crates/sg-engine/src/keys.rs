// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Routing of the keys the suggestion list reacts to.

use serde::{Deserialize, Serialize};

use crate::apply::Applied;
use crate::candidates::CandidateSource;
use crate::engine::SuggestEngine;
use crate::error::SuggestResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestKey {
    Up,
    Down,
    Enter,
    Tab,
    Space,
    CtrlSpace,
    Escape,
    Other,
}

/// What the host should do with the key after the engine saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine handled the key; the host must not process it further.
    Consumed { edit: Option<Applied> },
    /// The host processes the key as usual, after applying `edit` if any.
    PassThrough { edit: Option<Applied> },
}

impl KeyOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, KeyOutcome::Consumed { .. })
    }

    pub fn edit(&self) -> Option<&Applied> {
        match self {
            KeyOutcome::Consumed { edit } | KeyOutcome::PassThrough { edit } => edit.as_ref(),
        }
    }

    fn consumed() -> Self {
        KeyOutcome::Consumed { edit: None }
    }

    fn pass() -> Self {
        KeyOutcome::PassThrough { edit: None }
    }
}

impl<S: CandidateSource> SuggestEngine<S> {
    /// Dispatch a key press against the current session.
    ///
    /// Space commits the highlighted entry and still lets the host insert the
    /// space, so typing past a suggestion accepts it.
    pub fn handle_key(
        &mut self,
        key: SuggestKey,
        text: &str,
        caret: usize,
    ) -> SuggestResult<KeyOutcome> {
        if !self.is_open() {
            return match key {
                SuggestKey::CtrlSpace => {
                    self.open_manual(text, caret)?;
                    Ok(KeyOutcome::consumed())
                }
                _ => Ok(KeyOutcome::pass()),
            };
        }

        let outcome = match key {
            SuggestKey::Up => {
                self.select_previous();
                KeyOutcome::consumed()
            }
            SuggestKey::Down => {
                self.select_next();
                KeyOutcome::consumed()
            }
            SuggestKey::Enter | SuggestKey::Tab => KeyOutcome::Consumed {
                edit: self.commit(text, caret)?,
            },
            SuggestKey::Space => KeyOutcome::PassThrough {
                edit: self.commit(text, caret)?,
            },
            SuggestKey::Escape => {
                self.cancel();
                KeyOutcome::consumed()
            }
            SuggestKey::CtrlSpace | SuggestKey::Other => KeyOutcome::pass(),
        };
        Ok(outcome)
    }
}
