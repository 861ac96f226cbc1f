// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;
use sg_config::{Resolved, SuggestConfig, paths};
use sg_logging::CliLoggingArgs;

pub mod candidates;
pub mod config_commands;
pub mod host;
pub mod inspect;
pub mod replay;

pub use clap::Parser;

#[derive(clap::Parser)]
#[command(
    name = "sg",
    about = "Inspect and replay inline suggestion sessions",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Extra configuration file layered above user and project files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Override a configuration key, e.g. --set triggers=@#
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    pub overrides: Vec<String>,
    #[command(flatten)]
    pub logging: CliLoggingArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the token span under a caret
    Token(inspect::TokenArgs),
    /// Score a token against a candidate
    Match(inspect::MatchArgs),
    /// Drive a simulated text input with a script of events
    Replay(replay::ReplayArgs),
    Config {
        #[command(subcommand)]
        subcommand: config_commands::ConfigCommands,
    },
}

impl Cli {
    /// Merge configuration from the standard files, `SG_*`, `--config` and `--set`.
    pub fn resolve_config(&self) -> Result<Resolved> {
        let cwd = std::env::current_dir().context("reading current directory")?;
        let mut paths = paths::discover_paths(Some(&cwd));
        paths.cli_config = self.config.clone();

        let flags = self
            .overrides
            .iter()
            .map(|raw| sg_config::env::parse_flag(raw))
            .collect::<Result<Vec<_>>>()?;
        let flag_refs: Vec<(&str, &str)> =
            flags.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

        sg_config::load_all(&paths, &flag_refs)
    }

    pub fn run(&self, resolved: &Resolved, settings: &SuggestConfig) -> Result<Value> {
        match &self.command {
            Commands::Token(args) => args.run(settings),
            Commands::Match(args) => args.run(settings),
            Commands::Replay(args) => args.run(settings),
            Commands::Config { subcommand } => subcommand.run(resolved, settings),
        }
    }
}
