// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use serde_json::Value as J;

pub const ENV_PREFIX: &str = "SG";

/// Overlay built from `SG_*` variables, e.g. `SG_NEAR_MATCH_THRESHOLD=0.2`
/// becomes `near-match-threshold = "0.2"`.
pub fn env_overlay() -> Result<J> {
    let built = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .convert_case(config::Case::Kebab),
        )
        .build()?;

    Ok(serde_json::to_value(
        built.try_deserialize::<serde_json::Map<String, J>>()?,
    )?)
}

/// Overlay built from `--set key=value` pairs.
pub fn flags_overlay(kv_pairs: &[(&str, &str)]) -> J {
    let mut root = serde_json::json!({});
    for (k, v) in kv_pairs {
        crate::merge::insert_dotted(&mut root, k, J::String(v.to_string()));
    }
    root
}

/// Split `key=value`, trimming the key.
pub fn parse_flag(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        anyhow::bail!("expected key=value, got {:?}", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("empty key in {:?}", raw);
    }
    Ok((key.to_string(), value.to_string()))
}
