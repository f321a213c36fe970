// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! JSON merging functionality

use serde_json::Value as J;

/// Merge two JSON values with deep object merging and array replacement
///
/// Objects are merged recursively, scalars/arrays replace the left value.
pub fn merge_two_json(base: &mut J, layer: J) {
    match (base, layer) {
        (J::Object(a), J::Object(b)) => {
            for (k, v) in b {
                merge_two_json(a.entry(k).or_insert(J::Null), v);
            }
        }
        // Policy: arrays are replaced wholesale
        (a @ J::Array(_), J::Array(b)) => *a = J::Array(b),
        (_, J::Null) => { /* keep left if right is null */ }
        (a, b) => *a = b,
    }
}

/// Insert a value at a dotted path in JSON, creating intermediate objects
///
/// A non-object value sitting on the path is replaced by a table so the
/// override always lands.
pub fn insert_dotted(root: &mut J, dotted: &str, v: J) {
    let mut cur = root;
    let mut walked = String::new();
    for part in dotted.split('.') {
        if !cur.is_object() {
            if !cur.is_null() {
                tracing::warn!(
                    key = dotted,
                    replaced = walked.as_str(),
                    value = %cur,
                    "replacing non-table value while applying override"
                );
            }
            *cur = J::Object(Default::default());
        }
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(part);
        let Some(map) = cur.as_object_mut() else {
            return;
        };
        cur = map.entry(part.to_string()).or_insert(J::Null);
    }
    *cur = v;
}
