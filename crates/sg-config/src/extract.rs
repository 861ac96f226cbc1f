// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::de::DeserializeOwned;
use serde_json::Value as J;

/// Deserialize the merged configuration, naming the offending key on failure.
pub fn get<T: DeserializeOwned>(root: &J) -> anyhow::Result<T> {
    serde_path_to_error::deserialize(root.clone())
        .map_err(|e| anyhow::anyhow!("Config extraction failed at '{}': {}", e.path(), e.inner()))
}
