// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::Serialize;
use serde_json::Value as J;
use std::collections::BTreeMap;

/// Configuration sources, lowest precedence first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    User,
    Project,
    Env,
    CliConfig,
    Flags,
}

/// Which scope set each dotted key, and every value it went through.
#[derive(Default, Clone, Debug, Serialize)]
pub struct Provenance {
    pub winner: BTreeMap<String, Scope>,
    pub changes: BTreeMap<String, Vec<(Scope, J)>>,
}

impl Provenance {
    /// Record every non-null leaf of `layer` as set by `scope`.
    pub fn record_layer(&mut self, layer: &J, scope: Scope, prefix: &str) {
        match layer {
            J::Object(obj) => {
                for (k, v) in obj {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{}.{}", prefix, k)
                    };
                    self.record_layer(v, scope, &key);
                }
            }
            J::Null => {}
            _ => {
                self.winner.insert(prefix.to_string(), scope);
                self.changes.entry(prefix.to_string()).or_default().push((scope, layer.clone()));
            }
        }
    }

    pub fn origin(&self, key: &str) -> Option<Scope> {
        self.winner.get(key).copied()
    }
}
