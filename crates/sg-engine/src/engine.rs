// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The suggestion session state machine.
//!
//! [`SuggestEngine`] is bound to one text surface. The host feeds it buffer and
//! caret notifications plus discrete commands; the engine decides when the
//! suggestion list opens, keeps it filtered against the token under the caret,
//! and turns a commit into a single buffer edit. Everything runs synchronously
//! on the caller's thread.

use tracing::{debug, trace};

use crate::apply::{Applied, apply_selection};
use crate::candidates::{Candidate, CandidateSource};
use crate::error::{SuggestError, SuggestResult};
use crate::matcher::{DEFAULT_NEAR_MATCH_THRESHOLD, NearMatcher};
use crate::session::{CloseReason, Session, SessionState};
use crate::text::{CharClasses, char_at, char_len, check_index};
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Whether typing a trigger character opens suggestions.
    pub enabled: bool,
    pub classes: CharClasses,
    pub near_match_threshold: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            classes: CharClasses::default(),
            near_match_threshold: DEFAULT_NEAR_MATCH_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenReason {
    Trigger,
    Manual,
}

type OpenListener = Box<dyn FnMut(bool)>;

pub struct SuggestEngine<S> {
    enabled: bool,
    tokenizer: Tokenizer,
    matcher: NearMatcher,
    source: S,
    session: Session,
    last_close: Option<CloseReason>,
    // Buffer as of the previous change notification.
    prev_text: String,
    open_listener: Option<OpenListener>,
}

impl<S: CandidateSource> SuggestEngine<S> {
    pub fn new(source: S, options: EngineOptions) -> Self {
        Self {
            enabled: options.enabled,
            tokenizer: Tokenizer::new(options.classes),
            matcher: NearMatcher::new(options.near_match_threshold),
            source,
            session: Session::default(),
            last_close: None,
            prev_text: String::new(),
            open_listener: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn last_close_reason(&self) -> Option<CloseReason> {
        self.last_close
    }

    /// Register the callback told about every Closed/Open flip.
    pub fn set_open_listener<F>(&mut self, listener: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.open_listener = Some(Box::new(listener));
    }

    /// Seed the previous-buffer snapshot, e.g. when attaching to a surface
    /// that already holds text.
    pub fn reset_buffer(&mut self, text: &str) {
        self.prev_text = text.to_string();
    }

    /// The buffer changed; `caret` is the caret after the edit.
    pub fn on_buffer_changed(&mut self, text: &str, caret: usize) -> SuggestResult<()> {
        let result = if self.session.is_open() {
            self.update_token(text, caret)
        } else {
            self.check_open_trigger(text, caret)
        };
        self.prev_text = text.to_string();
        result
    }

    /// The caret moved without a buffer change.
    pub fn on_caret_moved(&mut self, text: &str, caret: usize) -> SuggestResult<()> {
        check_index(caret, char_len(text))?;
        if !self.session.is_open() {
            return Ok(());
        }
        self.update_token(text, caret)
    }

    /// Explicit open command. Works without a trigger character and regardless
    /// of the enabled flag.
    pub fn open_manual(&mut self, text: &str, caret: usize) -> SuggestResult<()> {
        check_index(caret, char_len(text))?;
        if self.session.is_open() {
            return Ok(());
        }
        self.open(text, caret, OpenReason::Manual)
    }

    /// The host closed its popup on its own.
    pub fn dismiss(&mut self) {
        self.close(CloseReason::Dismissed);
    }

    pub fn cancel(&mut self) {
        self.close(CloseReason::Cancelled);
    }

    /// Returns false when there is no open session to navigate.
    pub fn select_next(&mut self) -> bool {
        if !self.session.is_open() {
            return false;
        }
        self.session.select_next();
        true
    }

    /// Returns false when there is no open session to navigate.
    pub fn select_previous(&mut self) -> bool {
        if !self.session.is_open() {
            return false;
        }
        self.session.select_previous();
        true
    }

    pub fn select_index(&mut self, index: usize) -> SuggestResult<()> {
        let len = self.session.filtered.len();
        if index >= len {
            return Err(SuggestError::NoSuchCandidate { index, len });
        }
        self.session.selected = Some(index);
        Ok(())
    }

    /// Replace the token under `caret` with the highlighted candidate.
    ///
    /// Closes the session unless the caret is out of range, in which case the
    /// session is left untouched. Returns `Ok(None)` when no session is open or
    /// nothing is highlighted.
    pub fn commit(&mut self, text: &str, caret: usize) -> SuggestResult<Option<Applied>> {
        if !self.session.is_open() {
            return Ok(None);
        }
        let applied = match self.session.selected() {
            Some(candidate) => Some(apply_selection(&self.tokenizer, text, caret, candidate)?),
            None => None,
        };
        self.close(CloseReason::Committed);
        if let Some(applied) = &applied {
            debug!(
                "committed suggestion {:?}, caret now {}",
                applied.text, applied.caret
            );
        }
        Ok(applied)
    }

    /// Highlight `index` and commit it, as for a pointer double-click.
    pub fn commit_index(
        &mut self,
        text: &str,
        caret: usize,
        index: usize,
    ) -> SuggestResult<Option<Applied>> {
        if !self.session.is_open() {
            return Ok(None);
        }
        self.select_index(index)?;
        self.commit(text, caret)
    }

    fn check_open_trigger(&mut self, text: &str, caret: usize) -> SuggestResult<()> {
        check_index(caret, char_len(text))?;
        if caret == 0 {
            return Ok(());
        }
        let Some(typed) = char_at(text, caret - 1) else {
            return Ok(());
        };
        if !self.tokenizer.is_trigger(typed) {
            return Ok(());
        }
        // Same trigger already sat at this offset before the edit: nothing new was typed.
        if char_at(&self.prev_text, caret - 1) == Some(typed) {
            trace!("trigger {:?} at {} was already present", typed, caret - 1);
            return Ok(());
        }
        if !self.enabled {
            trace!("suggestions disabled, ignoring trigger {:?}", typed);
            return Ok(());
        }
        self.open(text, caret, OpenReason::Trigger)
    }

    fn open(&mut self, text: &str, caret: usize, reason: OpenReason) -> SuggestResult<()> {
        self.source.refresh();

        let span = self.tokenizer.token_area(text, caret)?;
        let starts_with_trigger =
            span.len > 0 && char_at(text, span.start).is_some_and(|c| self.tokenizer.is_trigger(c));
        self.session.token_start = if starts_with_trigger {
            span.start + 1
        } else {
            span.start
        };

        match self.refresh_candidates(text, caret)? {
            Some(close) => {
                debug!("{:?} open at {} abandoned: {:?}", reason, caret, close);
                self.session.reset();
                self.last_close = Some(close);
            }
            None => {
                debug!(
                    "{:?} open at {}, token {:?} with {} candidates",
                    reason,
                    caret,
                    self.session.current_token,
                    self.session.filtered.len()
                );
                self.set_state(SessionState::Open);
            }
        }
        Ok(())
    }

    fn update_token(&mut self, text: &str, caret: usize) -> SuggestResult<()> {
        if let Some(close) = self.refresh_candidates(text, caret)? {
            self.close(close);
        }
        Ok(())
    }

    /// Recompute token, candidates and default highlight for `caret`.
    ///
    /// Returns the reason the session can no longer stay open, if any.
    fn refresh_candidates(
        &mut self,
        text: &str,
        caret: usize,
    ) -> SuggestResult<Option<CloseReason>> {
        check_index(caret, char_len(text))?;
        if caret < self.session.token_start {
            return Ok(Some(CloseReason::CaretBeforeToken));
        }

        let current = self.tokenizer.token_at(text, caret)?;
        let anchored = self.tokenizer.token_at(text, self.session.token_start)?;
        if current != anchored {
            return Ok(Some(CloseReason::LeftToken));
        }

        let filtered = self.source.query(&current);
        let Some(longest) = filtered.iter().map(Candidate::char_len).max() else {
            return Ok(Some(CloseReason::NoCandidates));
        };
        if current.chars().count() > longest {
            return Ok(Some(CloseReason::TokenOvergrown));
        }

        self.session.selected = filtered
            .first()
            .filter(|best| self.matcher.is_near_match(&current, &best.text))
            .map(|_| 0);
        trace!(
            "token {:?}: {} candidates, selected {:?}",
            current,
            filtered.len(),
            self.session.selected
        );
        self.session.current_token = current;
        self.session.filtered = filtered;
        Ok(None)
    }

    fn close(&mut self, reason: CloseReason) {
        if !self.session.is_open() {
            return;
        }
        debug!("suggestion session closed: {:?}", reason);
        self.last_close = Some(reason);
        self.session.reset();
        self.notify(false);
    }

    fn set_state(&mut self, state: SessionState) {
        if self.session.state == state {
            return;
        }
        self.session.state = state;
        self.notify(state == SessionState::Open);
    }

    fn notify(&mut self, open: bool) {
        if let Some(listener) = self.open_listener.as_mut() {
            listener(open);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::candidates::StaticCandidates;

    fn engine(texts: &[&str]) -> SuggestEngine<StaticCandidates> {
        let options = EngineOptions {
            classes: CharClasses::new(['@'], [' ']).unwrap(),
            ..Default::default()
        };
        SuggestEngine::new(StaticCandidates::from_texts(texts.iter().copied()), options)
    }

    /// Type `typed` one character at a time at the end of `start`.
    fn type_text(engine: &mut SuggestEngine<StaticCandidates>, start: &str, typed: &str) -> String {
        let mut text = start.to_string();
        for c in typed.chars() {
            text.push(c);
            engine.on_buffer_changed(&text, char_len(&text)).unwrap();
        }
        text
    }

    #[test]
    fn typing_a_trigger_opens_with_all_candidates() {
        let mut e = engine(&["@world", "@work"]);
        type_text(&mut e, "", "hello @");
        assert!(e.is_open());
        assert_eq!(e.session().token_start(), 7);
        assert_eq!(e.session().current_token(), "@");
        assert_eq!(e.session().filtered().len(), 2);
        assert_eq!(e.session().selected_index(), Some(0));
    }

    #[test]
    fn typing_narrows_and_keeps_near_match_selected() {
        let mut e = engine(&["@world", "@work", "@alice"]);
        type_text(&mut e, "", "hello @wor");
        assert!(e.is_open());
        assert_eq!(e.session().current_token(), "@wor");
        let texts: Vec<&str> = e.session().filtered().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["@world", "@work"]);
        assert_eq!(e.session().selected_index(), Some(0));
    }

    #[test]
    fn disabled_engine_ignores_triggers() {
        let mut e = engine(&["@world"]);
        e.set_enabled(false);
        assert!(!e.is_enabled());
        type_text(&mut e, "", "@");
        assert!(!e.is_open());
    }

    #[test]
    fn trigger_already_present_at_same_offset_does_not_open() {
        let mut e = engine(&["@world"]);
        e.reset_buffer("@");
        e.on_buffer_changed("@x", 1).unwrap();
        assert!(!e.is_open());
    }

    #[test]
    fn no_candidates_closes_the_session() {
        let mut e = engine(&["@world"]);
        type_text(&mut e, "", "@wa");
        assert!(!e.is_open());
        assert_eq!(e.last_close_reason(), Some(CloseReason::NoCandidates));
    }

    #[test]
    fn token_longer_than_every_candidate_closes() {
        struct Everything;
        impl CandidateSource for Everything {
            fn query(&self, _token: &str) -> Vec<Candidate> {
                vec![Candidate::new("@ab")]
            }
        }
        let options = EngineOptions {
            classes: CharClasses::new(['@'], [' ']).unwrap(),
            ..Default::default()
        };
        let mut e = SuggestEngine::new(Everything, options);
        let mut text = String::new();
        for c in "@abc".chars() {
            text.push(c);
            e.on_buffer_changed(&text, char_len(&text)).unwrap();
        }
        assert!(!e.is_open());
        assert_eq!(e.last_close_reason(), Some(CloseReason::TokenOvergrown));
    }

    #[test]
    fn typing_a_splitter_leaves_the_token() {
        let mut e = engine(&["@world"]);
        let text = type_text(&mut e, "", "@wo");
        assert!(e.is_open());
        type_text(&mut e, &text, " ");
        assert!(!e.is_open());
        assert_eq!(e.last_close_reason(), Some(CloseReason::LeftToken));
    }

    #[test]
    fn caret_before_token_start_invalidates() {
        let mut e = engine(&["@bob"]);
        let text = type_text(&mut e, "", "ab @b");
        assert_eq!(e.session().token_start(), 4);
        e.on_caret_moved(&text, 0).unwrap();
        assert!(!e.is_open());
        assert_eq!(e.last_close_reason(), Some(CloseReason::CaretBeforeToken));
    }

    #[test]
    fn open_listener_sees_each_flip_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut e = engine(&["@world"]);
        let sink = Rc::clone(&seen);
        e.set_open_listener(move |open| sink.borrow_mut().push(open));

        let text = type_text(&mut e, "", "@w");
        e.cancel();
        e.cancel();
        e.open_manual(&text, 2).unwrap();
        e.dismiss();

        assert_eq!(*seen.borrow(), vec![true, false, true, false]);
    }

    #[test]
    fn manual_open_ignores_enabled_flag() {
        let mut e = engine(&["@world"]);
        e.set_enabled(false);
        e.open_manual("@w", 2).unwrap();
        assert!(e.is_open());
        assert_eq!(e.session().token_start(), 1);
    }

    #[test]
    fn manual_open_on_plain_word_anchors_at_word_start() {
        let mut e = engine(&["hello", "help"]);
        e.open_manual("say hel", 7).unwrap();
        assert!(e.is_open());
        assert_eq!(e.session().token_start(), 4);
        assert_eq!(e.session().current_token(), "hel");
    }

    #[test]
    fn out_of_range_caret_fails_the_event_but_not_the_engine() {
        let mut e = engine(&["@world"]);
        let text = type_text(&mut e, "", "@w");
        assert_eq!(
            e.on_caret_moved(&text, 9),
            Err(SuggestError::OutOfRange { index: 9, len: 2 })
        );
        assert!(e.is_open());
        let text = type_text(&mut e, &text, "o");
        assert_eq!(e.session().current_token(), "@wo");
        assert_eq!(text, "@wo");
    }

    #[test]
    fn caret_past_the_end_is_rejected_while_closed() {
        let mut e = engine(&["@world"]);
        assert_eq!(
            e.on_caret_moved("ab", 9),
            Err(SuggestError::OutOfRange { index: 9, len: 2 })
        );
        assert!(!e.is_open());
        assert!(e.on_caret_moved("ab", 2).is_ok());
    }

    #[test]
    fn failed_commit_keeps_the_session_open() {
        let mut e = engine(&["@world"]);
        let text = type_text(&mut e, "", "@w");
        assert_eq!(
            e.commit(&text, 9),
            Err(SuggestError::OutOfRange { index: 9, len: 2 })
        );
        assert!(e.is_open());
        assert_eq!(e.session().selected_index(), Some(0));

        let applied = e.commit(&text, 2).unwrap().unwrap();
        assert_eq!(applied.text, "@world");
        assert!(!e.is_open());
    }

    #[test]
    fn commit_without_selection_only_closes() {
        let mut e = engine(&["@world"]);
        let text = type_text(&mut e, "", "@");
        e.on_caret_moved(&text, 1).unwrap();
        e.session.selected = None;
        assert_eq!(e.commit(&text, 1).unwrap(), None);
        assert!(!e.is_open());
        assert_eq!(e.last_close_reason(), Some(CloseReason::Committed));
    }

    #[test]
    fn commit_index_picks_a_specific_candidate() {
        let mut e = engine(&["@world", "@work"]);
        let text = type_text(&mut e, "", "hi @wo");
        let applied = e.commit_index(&text, 6, 1).unwrap().unwrap();
        assert_eq!(applied.text, "hi @work");
        assert_eq!(applied.caret, 8);
        assert!(!e.is_open());
    }

    #[test]
    fn commit_index_rejects_unknown_entries() {
        let mut e = engine(&["@world"]);
        let text = type_text(&mut e, "", "@w");
        assert_eq!(
            e.commit_index(&text, 2, 4),
            Err(SuggestError::NoSuchCandidate { index: 4, len: 1 })
        );
    }
}
