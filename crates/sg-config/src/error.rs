// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use sg_engine::SuggestError;
use thiserror::Error;

/// Settings that parse but cannot drive the engine.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid character classes: {0}")]
    Classes(#[from] SuggestError),
    #[error("near-match-threshold must be within (0, 1], got {0}")]
    Threshold(f64),
}
