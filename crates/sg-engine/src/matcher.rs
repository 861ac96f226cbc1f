// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Approximate-match gate deciding whether the best candidate is highlighted
//! by default. Ranking is the candidate source's job; this only says yes/no.

/// Scores below this are considered a near match.
pub const DEFAULT_NEAR_MATCH_THRESHOLD: f64 = 0.34;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearMatcher {
    threshold: f64,
}

impl Default for NearMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_NEAR_MATCH_THRESHOLD)
    }
}

impl NearMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Normalized distance in `[0, 1]`, lower is closer.
    ///
    /// Takes the better of two alignments, both case-insensitive: the token
    /// against the candidate prefix of the same length (so a token that is
    /// still being typed scores as exact), and the token against the whole
    /// candidate (so typos in a nearly complete token are tolerated).
    pub fn score(&self, token: &str, candidate: &str) -> f64 {
        let token = token.to_lowercase();
        let candidate = candidate.to_lowercase();
        let token_len = token.chars().count();
        if token_len == 0 {
            return 1.0;
        }

        let prefix: String = candidate.chars().take(token_len).collect();
        let prefix_score =
            (strsim::levenshtein(&token, &prefix) as f64 / token_len as f64).min(1.0);
        let whole_score = 1.0 - strsim::normalized_levenshtein(&token, &candidate);

        prefix_score.min(whole_score)
    }

    pub fn is_near_match(&self, token: &str, candidate: &str) -> bool {
        !token.is_empty() && self.score(token, candidate) < self.threshold
    }
}

/// [`NearMatcher::is_near_match`] with the default threshold.
pub fn is_near_match(token: &str, candidate: &str) -> bool {
    NearMatcher::default().is_near_match(token, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_of_candidate_is_near() {
        assert!(is_near_match("@wor", "@world"));
        assert!(is_near_match("@wor", "@work"));
        assert_eq!(NearMatcher::default().score("@wor", "@world"), 0.0);
    }

    #[test]
    fn empty_token_is_never_near() {
        assert!(!is_near_match("", "@world"));
        assert!(!is_near_match("", ""));
    }

    #[test]
    fn empty_candidate_is_not_near() {
        assert!(!is_near_match("@a", ""));
    }

    #[test]
    fn unrelated_text_is_rejected() {
        assert!(!is_near_match("@xyz", "@world"));
    }

    #[test]
    fn small_typo_in_long_token_is_tolerated() {
        assert!(is_near_match("@wrld", "@world"));
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(is_near_match("@WOR", "@world"));
    }

    #[test]
    fn threshold_is_configurable() {
        let strict = NearMatcher::new(0.1);
        assert!(!strict.is_near_match("@wrld", "@world"));
        let lenient = NearMatcher::new(0.9);
        assert!(lenient.is_near_match("@xyz", "@world"));
    }

    #[test]
    fn score_is_deterministic() {
        let m = NearMatcher::default();
        assert_eq!(m.score("@kri", "@krile"), m.score("@kri", "@krile"));
    }
}
