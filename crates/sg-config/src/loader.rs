// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Reading TOML layers and validating them against the settings schema.

use anyhow::{Context, Result};
use serde_json::Value as J;
use std::path::Path;

use crate::provenance::Scope;

/// Parse TOML text into JSON so layers can be validated and merged uniformly.
pub fn parse_toml_to_json(toml_str: &str) -> Result<J> {
    let toml: toml::Value = toml_str.parse::<toml::Value>()?;
    Ok(serde_json::to_value(toml)?)
}

pub fn validate_against_schema(v: &J) -> Result<()> {
    use jsonschema::{Draft, JSONSchema};
    use std::sync::OnceLock;

    static SCHEMA: OnceLock<J> = OnceLock::new();
    let schema = SCHEMA.get_or_init(|| {
        let root = schemars::schema_for!(crate::settings::SuggestConfig);
        serde_json::to_value(root).unwrap_or(J::Bool(true))
    });

    static VALIDATOR: OnceLock<Option<JSONSchema>> = OnceLock::new();
    let validator = VALIDATOR.get_or_init(|| {
        JSONSchema::options().with_draft(Draft::Draft202012).compile(schema).ok()
    });
    let Some(validator) = validator else {
        anyhow::bail!("settings schema failed to compile");
    };

    if let Err(errors) = validator.validate(v) {
        let error_msg = errors.map(|e| e.to_string()).collect::<Vec<_>>().join("\n  - ");
        anyhow::bail!("Config schema validation failed:\n  - {}", error_msg);
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub scope: Scope,
    pub json: J,
}

pub fn read_layer_from_file(path: &Path, scope: Scope) -> Result<Layer> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading config file {:?}", path))?;

    let json = parse_toml_to_json(&content)
        .with_context(|| format!("parsing config file {:?}", path))?;
    validate_against_schema(&json).with_context(|| format!("validating config file {:?}", path))?;

    Ok(Layer { scope, json })
}
