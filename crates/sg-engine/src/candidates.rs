// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};
use serde::{Deserialize, Serialize};

pub const MAX_RESULTS: usize = 500;

/// One entry of the suggestion list.
///
/// Only `text` takes part in matching and commit; the rest is carried through
/// for the host to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: None,
            icon: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Produces the candidates matching a token.
///
/// Implementations must be deterministic for a given token and accept the
/// empty token. Asynchronous sources should debounce and cache upstream and
/// answer from a snapshot here.
pub trait CandidateSource {
    fn query(&self, token: &str) -> Vec<Candidate>;

    /// Called once each time a session opens, before the first query.
    fn refresh(&self) {}
}

impl<S: CandidateSource + ?Sized> CandidateSource for &S {
    fn query(&self, token: &str) -> Vec<Candidate> {
        (**self).query(token)
    }

    fn refresh(&self) {
        (**self).refresh()
    }
}

impl<S: CandidateSource + ?Sized> CandidateSource for Box<S> {
    fn query(&self, token: &str) -> Vec<Candidate> {
        (**self).query(token)
    }

    fn refresh(&self) {
        (**self).refresh()
    }
}

/// Fixed list filtered by case-insensitive prefix, in list order.
#[derive(Debug, Clone, Default)]
pub struct StaticCandidates {
    items: Vec<Candidate>,
}

impl StaticCandidates {
    pub fn new(items: Vec<Candidate>) -> Self {
        Self { items }
    }

    pub fn from_texts<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(texts.into_iter().map(Candidate::new).collect())
    }
}

impl CandidateSource for StaticCandidates {
    fn query(&self, token: &str) -> Vec<Candidate> {
        let needle = token.to_lowercase();
        self.items
            .iter()
            .filter(|c| c.text.to_lowercase().starts_with(&needle))
            .cloned()
            .collect()
    }
}

/// Fixed list ranked by fuzzy score, best first.
#[derive(Debug, Clone, Default)]
pub struct FuzzyCandidates {
    items: Vec<Candidate>,
}

impl FuzzyCandidates {
    pub fn new(items: Vec<Candidate>) -> Self {
        Self { items }
    }

    pub fn from_texts<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(texts.into_iter().map(Candidate::new).collect())
    }
}

impl CandidateSource for FuzzyCandidates {
    fn query(&self, token: &str) -> Vec<Candidate> {
        if token.is_empty() {
            return self.items.iter().take(MAX_RESULTS).cloned().collect();
        }

        let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
        let pattern = Pattern::new(
            token,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut scored: Vec<(u32, &Candidate)> = self
            .items
            .iter()
            .filter_map(|candidate| {
                let haystack = Utf32String::from(candidate.text.as_str());
                pattern.score(haystack.slice(..), &mut matcher).map(|score| (score, candidate))
            })
            .collect();

        // Stable, so equal scores keep list order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(MAX_RESULTS);
        scored.into_iter().map(|(_, candidate)| candidate.clone()).collect()
    }
}
