// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Environment variable and CLI flag overlays

use anyhow::Result;
use serde_json::Value as J;

/// Prefix of environment variables read into the configuration
pub const ENV_PREFIX: &str = "SKILL_DOLLAR";

/// Errors produced while parsing `--set key=value` flags
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("expected key=value, got '{0}'")]
    MissingEquals(String),
    #[error("empty key in '{0}'")]
    EmptyKey(String),
}

/// Create JSON overlay from `SKILL_DOLLAR_*` environment variables
///
/// Nested keys use a double underscore:
/// `SKILL_DOLLAR_SUGGEST__MAX_VISIBLE=7` sets `suggest.max-visible`.
pub fn env_overlay() -> Result<J> {
    let built = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Kebab),
        )
        .build()?;

    let mut map = built.try_deserialize::<serde_json::Map<String, J>>()?;
    // SKILL_DOLLAR_HOME and SKILL_DOLLAR_ROOT locate files; they are not settings.
    map.remove("home");
    map.remove("root");
    Ok(J::Object(map))
}

/// Create JSON overlay from CLI flag key=value pairs
pub fn flags_overlay(kv_pairs: &[(&str, &str)]) -> J {
    let mut root = serde_json::json!({});
    for (k, v) in kv_pairs {
        crate::merge::insert_dotted(&mut root, k, parse_flag_value(v));
    }
    root
}

/// Split a raw `key=value` flag
pub fn split_flag(raw: &str) -> Result<(&str, &str), FlagError> {
    let (key, value) = raw.split_once('=').ok_or_else(|| FlagError::MissingEquals(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(FlagError::EmptyKey(raw.to_string()));
    }
    Ok((key, value.trim()))
}

/// Interpret a flag value as a TOML literal, falling back to a plain string
fn parse_flag_value(raw: &str) -> J {
    toml::from_str::<toml::Table>(&format!("value = {}", raw))
        .ok()
        .and_then(|mut table| table.remove("value"))
        .and_then(|value| serde_json::to_value(value).ok())
        .unwrap_or_else(|| J::String(raw.to_string()))
}
