// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use sg_cli::{Cli, Parser};
use sg_logging::CliLogLevel;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolved = cli.resolve_config()?;
    let settings = resolved.settings()?;

    let fallback_level = match settings.log_level.as_deref() {
        Some(level) => level.parse::<CliLogLevel>().map_err(anyhow::Error::msg)?,
        None => CliLogLevel::default(),
    };
    cli.logging.init("sg-cli", fallback_level)?;
    tracing::debug!("configuration origins: {:?}", resolved.provenance.winner);

    let output = cli.run(&resolved, &settings)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
