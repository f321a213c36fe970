// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use sd_config::MentionPolicy;
use sd_skills::SkillIndex;
use sd_tui::{mention_tokens, mentioned_skills, Directive, PromptHook};
use serde::Serialize;

use crate::Session;

#[derive(Args, Clone, Debug, Default)]
pub struct ExtractArgs {
    /// Prompt file to scan; standard input when omitted
    pub file: Option<PathBuf>,
    /// Print a JSON report including the directive payload
    #[arg(long)]
    pub json: bool,
}

/// Result of scanning one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub skills: Vec<String>,
    /// `$tokens` that do not name a loaded skill
    pub unknown: Vec<String>,
    pub directive: Option<Directive>,
}

impl ExtractReport {
    pub fn new(prompt: &str, index: &Arc<SkillIndex>, policy: MentionPolicy) -> Self {
        let skills: Vec<String> = mentioned_skills(prompt, index, policy)
            .iter()
            .map(|skill| skill.name.clone())
            .collect();
        let unknown = mention_tokens(prompt)
            .into_iter()
            .filter(|token| !index.contains(token))
            .collect();
        let hook = PromptHook::new(Arc::clone(index), policy);
        Self {
            skills,
            unknown,
            directive: hook.on_submit(prompt),
        }
    }
}

impl ExtractArgs {
    pub fn run(self, session: &Session, out: &mut impl Write) -> Result<()> {
        let prompt = match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read prompt from {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read prompt from stdin")?;
                buf
            }
        };

        let index = session.load_index();
        let policy = session.config.suggest.mention_policy.unwrap_or_default();
        let report = ExtractReport::new(&prompt, &index, policy);
        tracing::debug!(?policy, found = report.skills.len(), "extracted mentions");
        write_report(out, &report, self.json)
    }
}

pub fn write_report(out: &mut impl Write, report: &ExtractReport, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        return Ok(());
    }
    for name in &report.skills {
        writeln!(out, "${name}")?;
    }
    for token in &report.unknown {
        writeln!(out, "${token} (unknown)")?;
    }
    Ok(())
}
