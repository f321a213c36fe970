// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Layered configuration for skill-dollar.
//!
//! Configuration is loaded from TOML files, `SKILL_DOLLAR_*` environment
//! variables and CLI flags. Layers are merged as JSON values, file layers are
//! validated against a schema generated from [`SkillDollarConfig`], and the
//! scope that set every key is tracked for `config show`.

pub mod env;
pub mod extract;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod provenance;
pub mod schema;

pub use provenance::{Provenance, Scope};
pub use schema::{
    KeymapConfig, MentionPolicy, Placement, SkillDollarConfig, SkillsConfig, SuggestConfig,
};

use anyhow::Result;
use serde_json::Value as J;

/// Final resolved configuration with provenance information
#[derive(Debug)]
pub struct Resolved {
    /// Final merged JSON configuration
    pub json: J,
    /// Provenance tracking for all configuration values
    pub provenance: Provenance,
}

impl Resolved {
    /// Typed view of the merged configuration
    pub fn config(&self) -> Result<SkillDollarConfig> {
        extract::get(&self.json)
    }
}

/// Load and merge all configuration layers according to precedence rules
///
/// Precedence order: system < user < repo < env < cli-config < flags.
/// Missing files are skipped; an explicit `--config` file that fails to load
/// is an error, other broken files are logged and skipped.
pub fn load_all(paths: &paths::Paths, flag_sets: &[(&str, &str)]) -> Result<Resolved> {
    use Scope::*;

    let mut file_layers = Vec::new();
    for (path, scope) in [
        (Some(&paths.system), System),
        (Some(&paths.user), User),
        (paths.repo.as_ref(), Repo),
    ] {
        let Some(path) = path.filter(|p| p.exists()) else {
            continue;
        };
        match loader::read_layer_from_file(path, scope) {
            Ok(layer) => file_layers.push(layer),
            Err(err) => tracing::warn!(?path, %scope, "skipping config layer: {err:#}"),
        }
    }

    let env_layer = loader::Layer {
        scope: Env,
        json: env::env_overlay()?,
    };
    let cli_layer = match paths.cli_config.as_ref() {
        Some(path) => Some(loader::read_layer_from_file(path, CliConfig)?),
        None => None,
    };
    let flags_layer = loader::Layer {
        scope: Flags,
        json: env::flags_overlay(flag_sets),
    };

    let mut prov = Provenance::default();
    let mut json = serde_json::json!({});
    for layer in file_layers.into_iter().chain([env_layer]).chain(cli_layer).chain([flags_layer]) {
        prov.record_layer(&layer.json, layer.scope, "");
        merge::merge_two_json(&mut json, layer.json);
    }

    Ok(Resolved {
        json,
        provenance: prov,
    })
}
