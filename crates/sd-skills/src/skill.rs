// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use serde::Serialize;

/// Longest accepted skill name, and the longest query the editor extracts.
pub const MAX_NAME_LEN: usize = 64;

/// A named skill. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Skill {
    /// Unique lowercase name, `[a-z0-9]+(-[a-z0-9]+)*`
    pub name: String,
    /// Free-form description, may span several lines
    pub description: String,
    /// Human-readable provenance label such as `user` or `project`
    pub source: String,
}

impl Skill {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            source: source.into(),
        }
    }
}

/// Check a name against `[a-z0-9]+(-[a-z0-9]+)*` and the length limit.
pub fn is_valid_skill_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    name.split('-')
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}
