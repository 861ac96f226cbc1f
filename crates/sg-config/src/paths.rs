// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "SUGGEST_HOME";

#[derive(Debug, Clone, Default)]
pub struct Paths {
    pub user: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub cli_config: Option<PathBuf>,
}

/// Standard locations: the per-user file and `<project>/.suggest/config.toml`.
pub fn discover_paths(project_root: Option<&Path>) -> Paths {
    Paths {
        user: user_config_path(),
        project: project_root.map(|root| root.join(".suggest").join("config.toml")),
        cli_config: None,
    }
}

/// `$SUGGEST_HOME/config.toml`, else the platform config directory.
fn user_config_path() -> Option<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        return Some(PathBuf::from(home).join("config.toml"));
    }
    dirs::config_dir().map(|dir| dir.join("suggest").join("config.toml"))
}
