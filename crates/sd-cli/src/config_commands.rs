// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration inspection commands
use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use sd_config::{Provenance, Resolved};
use serde_json::Value;

use crate::Session;

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show {
        /// Show configuration for specific key
        key: Option<String>,
        /// Show origin information for each value
        #[arg(long)]
        show_origin: bool,
    },
    /// Explain where a configuration value comes from
    Explain {
        /// Configuration key to explain
        key: String,
    },
}

impl ConfigCommands {
    pub fn run(self, session: &Session, out: &mut impl Write) -> Result<()> {
        match self {
            ConfigCommands::Show { key, show_origin } => {
                show_config(out, &session.resolved, key.as_deref(), show_origin)
            }
            ConfigCommands::Explain { key } => explain_config(out, &session.resolved, &key),
        }
    }
}

pub fn show_config(
    out: &mut impl Write,
    resolved: &Resolved,
    key_filter: Option<&str>,
    show_origin: bool,
) -> Result<()> {
    match key_filter {
        Some(filter) => match get_nested_value(&resolved.json, filter) {
            Some(value) => write_entry(out, filter, value, show_origin, &resolved.provenance)?,
            None => writeln!(out, "Configuration key '{}' not found", filter)?,
        },
        None => write_json_with_provenance(
            out,
            &resolved.json,
            "",
            show_origin,
            &resolved.provenance,
        )?,
    }
    Ok(())
}

pub fn explain_config(out: &mut impl Write, resolved: &Resolved, key: &str) -> Result<()> {
    let Some(scope) = resolved.provenance.winner.get(key) else {
        writeln!(out, "Configuration key '{}' was not set by any layer", key)?;
        return Ok(());
    };

    writeln!(out, "Configuration key: {}", key)?;
    writeln!(out, "Winning scope: {}", scope)?;
    if let Some(changes) = resolved.provenance.changes.get(key) {
        writeln!(out, "Change history:")?;
        for (change_scope, value) in changes {
            writeln!(out, "  {}: {}", change_scope, value)?;
        }
    }
    Ok(())
}

fn get_nested_value<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(json, |current, part| current.get(part))
}

fn write_entry(
    out: &mut impl Write,
    key: &str,
    value: &Value,
    show_origin: bool,
    provenance: &Provenance,
) -> std::io::Result<()> {
    match provenance.winner.get(key).filter(|_| show_origin) {
        Some(scope) => writeln!(out, "{}={} (from {})", key, value, scope),
        None => writeln!(out, "{}={}", key, value),
    }
}

fn write_json_with_provenance(
    out: &mut impl Write,
    json: &Value,
    prefix: &str,
    show_origin: bool,
    provenance: &Provenance,
) -> std::io::Result<()> {
    match json {
        Value::Object(obj) => {
            for (key, value) in obj {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                write_json_with_provenance(out, value, &full_key, show_origin, provenance)?;
            }
            Ok(())
        }
        _ => write_entry(out, prefix, json, show_origin, provenance),
    }
}
