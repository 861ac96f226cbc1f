// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde_json::Value as J;

/// Deep-merge `layer` into `base`: objects merge key by key, arrays and
/// scalars replace, and a null in `layer` keeps the value already in `base`.
pub fn merge_two_json(base: &mut J, layer: J) {
    match (base, layer) {
        (J::Object(a), J::Object(b)) => {
            for (k, v) in b {
                merge_two_json(a.entry(k).or_insert(J::Null), v);
            }
        }
        (_, J::Null) => {}
        (a, b) => *a = b,
    }
}

/// Set `dotted` (e.g. `popup.width`) in `root`, creating objects on the way.
pub fn insert_dotted(root: &mut J, dotted: &str, v: J) {
    let mut cur = root;
    let mut parts = dotted.split('.').peekable();
    while let Some(part) = parts.next() {
        if !cur.is_object() {
            *cur = J::Object(Default::default());
        }
        let J::Object(map) = cur else {
            return;
        };
        if parts.peek().is_none() {
            map.insert(part.to_string(), v);
            return;
        }
        cur = map.entry(part.to_string()).or_insert_with(|| J::Object(Default::default()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_merge_deeply() {
        let mut base = json!({"a": {"b": 1}});
        merge_two_json(&mut base, json!({"a": {"c": 2}}));
        assert_eq!(base, json!({"a": {"b": 1, "c": 2}}));
    }

    #[test]
    fn scalars_and_arrays_replace() {
        let mut base = json!({"enabled": true, "list": [1, 2]});
        merge_two_json(&mut base, json!({"enabled": false, "list": [3]}));
        assert_eq!(base, json!({"enabled": false, "list": [3]}));
    }

    #[test]
    fn null_keeps_left_value() {
        let mut base = json!({"triggers": "@"});
        merge_two_json(&mut base, json!({"triggers": null}));
        assert_eq!(base["triggers"], "@");
    }

    #[test]
    fn dotted_insert_builds_nested_objects() {
        let mut root = json!({});
        insert_dotted(&mut root, "popup.width", json!("40"));
        insert_dotted(&mut root, "enabled", json!("false"));
        assert_eq!(root, json!({"popup": {"width": "40"}, "enabled": "false"}));
    }
}
