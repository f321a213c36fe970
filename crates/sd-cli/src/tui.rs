// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use sd_tui::runtime::{self, AppExit, PromptApp, Submission};
use sd_tui::{SuggestSettings, Theme};

use crate::Session;

#[derive(Args, Clone, Debug, Default)]
pub struct TuiArgs {
    /// Use the terminal's default colours
    #[arg(long)]
    pub no_color: bool,
    /// Print the submission as a single JSON object
    #[arg(long)]
    pub json: bool,
}

impl TuiArgs {
    pub fn run(self, session: &Session, out: &mut impl Write) -> Result<()> {
        let settings = SuggestSettings::from_config(&session.config).context("invalid keymap")?;
        let theme = if self.no_color {
            Theme::plain()
        } else {
            Theme::default()
        };

        let index = session.load_index();
        tracing::info!(skills = index.len(), "starting prompt editor");
        let app = PromptApp::new(index, &settings, theme);

        match runtime::run(app)? {
            AppExit::Submitted(submission) => write_submission(out, &submission, self.json),
            AppExit::Quit => {
                tracing::info!("prompt discarded");
                Ok(())
            }
        }
    }
}

/// Print a submission: the directive payload first when there is one, then
/// the prompt itself.
pub fn write_submission(out: &mut impl Write, submission: &Submission, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, submission)?;
        writeln!(out)?;
        return Ok(());
    }
    if let Some(directive) = &submission.directive {
        writeln!(out, "{}", serde_json::to_string(directive)?)?;
    }
    writeln!(out, "{}", submission.prompt)?;
    Ok(())
}
