// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use clap::Subcommand;
use serde_json::{Value, json};
use sg_config::{Resolved, SuggestConfig};

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective settings and the scope each key came from
    Show {
        /// Also list every value each key took, layer by layer
        #[arg(long)]
        explain: bool,
    },
}

impl ConfigCommands {
    pub fn run(&self, resolved: &Resolved, settings: &SuggestConfig) -> Result<Value> {
        match self {
            ConfigCommands::Show { explain } => {
                // Fail here rather than at first use when the classes or threshold are unusable.
                settings.engine_options()?;
                let mut out = json!({
                    "settings": settings,
                    "origins": resolved.provenance.winner,
                });
                if *explain {
                    out["changes"] = serde_json::to_value(&resolved.provenance.changes)?;
                }
                Ok(out)
            }
        }
    }
}
