// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Layered configuration for the suggest tools.
//!
//! Sources are read as JSON, merged in precedence order and only then
//! deserialized into [`SuggestConfig`]:
//!
//! user file < project file < `SG_*` environment < `--config` file < `--set` flags
//!
//! File layers are validated against the schema derived from
//! [`SuggestConfig`]; environment and flag layers are plain strings and are
//! coerced during extraction.

pub mod env;
pub mod error;
pub mod extract;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod provenance;
pub mod settings;

pub use error::ConfigError;
pub use paths::Paths;
pub use provenance::{Provenance, Scope};
pub use settings::SuggestConfig;

use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value as J;
use tracing::{debug, trace};

use crate::loader::Layer;

/// Merged configuration plus where each value came from.
#[derive(Debug)]
pub struct Resolved {
    pub json: J,
    pub provenance: Provenance,
}

impl Resolved {
    pub fn settings(&self) -> Result<SuggestConfig> {
        extract::get(&self.json)
    }
}

/// Load every layer, reading the environment for the `SG_*` overlay.
pub fn load_all(paths: &Paths, flag_sets: &[(&str, &str)]) -> Result<Resolved> {
    let env_layer = env::env_overlay()?;
    load_layers(paths, env_layer, flag_sets)
}

/// Same as [`load_all`] with an explicit environment overlay.
pub fn load_layers(paths: &Paths, env_layer: J, flag_sets: &[(&str, &str)]) -> Result<Resolved> {
    use Scope::*;

    let read_optional = |path: &Option<PathBuf>, scope: Scope| -> Result<Option<Layer>> {
        match path {
            Some(p) if p.exists() => loader::read_layer_from_file(p, scope).map(Some),
            _ => Ok(None),
        }
    };

    let mut layers: Vec<Layer> = Vec::new();
    layers.extend(read_optional(&paths.user, User)?);
    layers.extend(read_optional(&paths.project, Project)?);
    layers.push(Layer {
        scope: Env,
        json: env_layer,
    });
    // An explicitly requested file must exist.
    if let Some(p) = &paths.cli_config {
        layers.push(loader::read_layer_from_file(p, CliConfig)?);
    }
    layers.push(Layer {
        scope: Flags,
        json: env::flags_overlay(flag_sets),
    });

    let mut json = serde_json::json!({});
    let mut provenance = Provenance::default();
    for layer in layers {
        trace!("merging {:?} layer", layer.scope);
        provenance.record_layer(&layer.json, layer.scope, "");
        merge::merge_two_json(&mut json, layer.json);
    }
    debug!("resolved configuration: {}", json);

    Ok(Resolved { json, provenance })
}
