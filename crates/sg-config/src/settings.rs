// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Typed view of the suggestion settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sg_engine::text::{DEFAULT_SPLITTERS, DEFAULT_TRIGGERS};
use sg_engine::{CharClasses, DEFAULT_NEAR_MATCH_THRESHOLD, EngineOptions};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", default)]
pub struct SuggestConfig {
    /// Open suggestions when a trigger character is typed
    #[serde(deserialize_with = "lenient::boolean")]
    #[schemars(with = "bool")]
    pub enabled: bool,
    /// Characters that start a token and stay part of it
    pub triggers: Option<String>,
    /// Characters that end a token
    pub splitters: Option<String>,
    /// Maximum normalized distance for the best candidate to be preselected
    #[serde(deserialize_with = "lenient::opt_number")]
    #[schemars(with = "Option<f64>")]
    pub near_match_threshold: Option<f64>,
    /// Rank candidates by fuzzy score instead of filtering by prefix
    #[serde(deserialize_with = "lenient::boolean")]
    #[schemars(with = "bool")]
    pub fuzzy: bool,
    /// Default log level when neither a flag nor RUST_LOG sets one
    pub log_level: Option<String>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            triggers: None,
            splitters: None,
            near_match_threshold: None,
            fuzzy: false,
            log_level: None,
        }
    }
}

impl SuggestConfig {
    pub fn engine_options(&self) -> Result<EngineOptions, ConfigError> {
        // A list left at its default yields the characters the other list claims;
        // two explicit lists must be disjoint.
        let (triggers, splitters) = match (&self.triggers, &self.splitters) {
            (Some(t), Some(s)) => (t.chars().collect::<Vec<_>>(), s.chars().collect::<Vec<_>>()),
            (Some(t), None) => {
                let triggers: Vec<char> = t.chars().collect();
                let splitters = without(DEFAULT_SPLITTERS, &triggers);
                (triggers, splitters)
            }
            (None, Some(s)) => {
                let splitters: Vec<char> = s.chars().collect();
                (without(DEFAULT_TRIGGERS, &splitters), splitters)
            }
            (None, None) => (DEFAULT_TRIGGERS.to_vec(), DEFAULT_SPLITTERS.to_vec()),
        };
        let classes = CharClasses::new(triggers, splitters)?;

        let threshold = self.near_match_threshold.unwrap_or(DEFAULT_NEAR_MATCH_THRESHOLD);
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::Threshold(threshold));
        }

        Ok(EngineOptions {
            enabled: self.enabled,
            classes,
            near_match_threshold: threshold,
        })
    }
}

fn without(defaults: &[char], claimed: &[char]) -> Vec<char> {
    defaults.iter().copied().filter(|c| !claimed.contains(c)).collect()
}

/// Environment variables and `--set` flags only produce strings; accept those
/// where the schema expects booleans or numbers.
mod lenient {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrText {
        Bool(bool),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match BoolOrText::deserialize(d)? {
            BoolOrText::Bool(b) => Ok(b),
            BoolOrText::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                other => Err(D::Error::custom(format!("expected a boolean, got {:?}", other))),
            },
        }
    }

    pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrText>::deserialize(d)? {
            None => Ok(None),
            Some(NumberOrText::Number(n)) => Ok(Some(n)),
            Some(NumberOrText::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a number, got {:?}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_engine::SuggestError;

    #[test]
    fn defaults_produce_default_engine_options() {
        let options = SuggestConfig::default().engine_options().unwrap();
        assert_eq!(options, EngineOptions::default());
    }

    #[test]
    fn custom_classes_are_applied() {
        let config = SuggestConfig {
            triggers: Some("@".into()),
            splitters: Some(" ,".into()),
            ..Default::default()
        };
        let options = config.engine_options().unwrap();
        assert!(options.classes.is_trigger('@'));
        assert!(!options.classes.is_trigger('#'));
        assert!(options.classes.is_splitter(','));
    }

    #[test]
    fn overlapping_classes_are_a_config_error() {
        let config = SuggestConfig {
            triggers: Some("@ ".into()),
            splitters: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(
            config.engine_options(),
            Err(ConfigError::Classes(SuggestError::OverlappingClasses(' ')))
        );
    }

    #[test]
    fn trigger_override_takes_characters_from_default_splitters() {
        let config = SuggestConfig {
            triggers: Some(":".into()),
            ..Default::default()
        };
        let options = config.engine_options().unwrap();
        assert!(options.classes.is_trigger(':'));
        assert!(!options.classes.is_splitter(':'));
        assert!(options.classes.is_splitter(' '));
        assert!(options.classes.is_splitter('.'));
    }

    #[test]
    fn splitter_override_takes_characters_from_default_triggers() {
        let config = SuggestConfig {
            splitters: Some(" #".into()),
            ..Default::default()
        };
        let options = config.engine_options().unwrap();
        assert!(options.classes.is_trigger('@'));
        assert!(!options.classes.is_trigger('#'));
        assert!(options.classes.is_splitter('#'));
    }

    #[test]
    fn threshold_must_be_a_fraction() {
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let config = SuggestConfig {
                near_match_threshold: Some(bad),
                ..Default::default()
            };
            assert!(config.engine_options().is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn string_values_are_accepted_for_typed_fields() {
        let json = serde_json::json!({
            "enabled": "off",
            "fuzzy": "1",
            "near-match-threshold": "0.5",
        });
        let config: SuggestConfig = serde_json::from_value(json).unwrap();
        assert!(!config.enabled);
        assert!(config.fuzzy);
        assert_eq!(config.near_match_threshold, Some(0.5));
    }

    #[test]
    fn garbage_boolean_is_rejected() {
        let json = serde_json::json!({ "enabled": "maybe" });
        assert!(serde_json::from_value::<SuggestConfig>(json).is_err());
    }
}
