// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Typed configuration sections.
//!
//! [`SkillDollarConfig`] is both the canonical shape used for schema
//! generation and the typed view extracted from the merged layers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SkillDollarConfig {
    /// Default log level (error, warn, info, debug, trace)
    pub log_level: Option<String>,

    #[serde(default)]
    pub skills: SkillsConfig,

    #[serde(default)]
    pub suggest: SuggestConfig,

    #[serde(default)]
    pub keymap: KeymapConfig,
}

/// Where skills are discovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SkillsConfig {
    /// Extra skill directories, scanned after the project and user roots
    #[serde(default)]
    pub paths: Vec<String>,
    /// Scan `~/.agents/skills`
    #[serde(default = "default_true")]
    pub include_user: bool,
    /// Scan `<root>/.agents/skills`
    #[serde(default = "default_true")]
    pub include_project: bool,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            include_user: true,
            include_project: true,
        }
    }
}

/// Suggestion popup behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SuggestConfig {
    /// Number of visible rows in the popup
    pub max_visible: Option<usize>,
    /// Show the skill source next to its name
    pub show_source: Option<bool>,
    pub placement: Option<Placement>,
    pub mention_policy: Option<MentionPolicy>,
}

/// Position of the suggestion widget relative to the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Above,
    #[default]
    Below,
}

/// Rule deciding whether a submitted prompt mentions skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MentionPolicy {
    /// `$name` tokens that name a known skill
    #[default]
    Indexed,
    /// Any `$name`-shaped token, known or not
    AnyToken,
    /// Known skill names as whole words, with or without `$`
    BareName,
}

/// Key bindings for the suggestion popup, in `Ctrl+N` / `C-n` notation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct KeymapConfig {
    pub select_previous: Option<Vec<String>>,
    pub select_next: Option<Vec<String>>,
    pub confirm_enter: Option<Vec<String>>,
    pub confirm_tab: Option<Vec<String>>,
    pub dismiss: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}
