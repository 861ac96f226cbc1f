// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Candidate lists given on the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sg_engine::{Candidate, CandidateSource, FuzzyCandidates, StaticCandidates};

#[derive(clap::Args, Debug, Clone, Default)]
pub struct CandidateArgs {
    /// Comma-separated candidate texts
    #[arg(long, value_delimiter = ',')]
    pub candidates: Vec<String>,
    /// File with one candidate per line, optionally `text<TAB>description`
    #[arg(long)]
    pub candidates_file: Option<PathBuf>,
}

impl CandidateArgs {
    pub fn collect(&self) -> Result<Vec<Candidate>> {
        let mut items: Vec<Candidate> = self
            .candidates
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Candidate::new)
            .collect();
        if let Some(path) = &self.candidates_file {
            items.extend(read_candidates_file(path)?);
        }
        Ok(items)
    }

    /// Build the source the engine queries, fuzzy-ranked when `fuzzy` is set.
    pub fn source(&self, fuzzy: bool) -> Result<Box<dyn CandidateSource>> {
        let items = self.collect()?;
        tracing::debug!("loaded {} candidates (fuzzy: {})", items.len(), fuzzy);
        Ok(if fuzzy {
            Box::new(FuzzyCandidates::new(items))
        } else {
            Box::new(StaticCandidates::new(items))
        })
    }
}

pub fn read_candidates_file(path: &Path) -> Result<Vec<Candidate>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading candidates from {}", path.display()))?;
    Ok(parse_candidate_lines(&content))
}

/// Blank lines and lines starting with `//` are skipped.
pub fn parse_candidate_lines(content: &str) -> Vec<Candidate> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with("//"))
        .map(|line| match line.split_once('\t') {
            Some((text, description)) if !description.trim().is_empty() => {
                Candidate::new(text.trim()).with_description(description.trim())
            }
            Some((text, _)) => Candidate::new(text.trim()),
            None => Candidate::new(line.trim()),
        })
        .collect()
}
