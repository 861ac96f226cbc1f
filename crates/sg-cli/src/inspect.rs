// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! One-shot `token` and `match` commands.

use anyhow::Result;
use serde_json::{Value, json};
use sg_config::SuggestConfig;
use sg_engine::text::char_len;
use sg_engine::{NearMatcher, Tokenizer};

#[derive(clap::Args, Debug, Clone)]
pub struct TokenArgs {
    /// Buffer contents
    #[arg(long)]
    pub text: String,
    /// Caret offset in characters (defaults to the end of the text)
    #[arg(long)]
    pub caret: Option<usize>,
}

impl TokenArgs {
    pub fn run(&self, settings: &SuggestConfig) -> Result<Value> {
        let options = settings.engine_options()?;
        let tokenizer = Tokenizer::new(options.classes);
        let caret = self.caret.unwrap_or_else(|| char_len(&self.text));
        let span = tokenizer.token_area(&self.text, caret)?;
        let token = tokenizer.token_text(span, &self.text)?;
        Ok(json!({
            "caret": caret,
            "span": span,
            "token": token,
        }))
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct MatchArgs {
    pub token: String,
    pub candidate: String,
}

impl MatchArgs {
    pub fn run(&self, settings: &SuggestConfig) -> Result<Value> {
        let options = settings.engine_options()?;
        let matcher = NearMatcher::new(options.near_match_threshold);
        Ok(json!({
            "token": self.token,
            "candidate": self.candidate,
            "score": matcher.score(&self.token, &self.candidate),
            "threshold": matcher.threshold(),
            "near": matcher.is_near_match(&self.token, &self.candidate),
        }))
    }
}
