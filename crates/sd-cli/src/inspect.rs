// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Batch views of the skill index: `list` and `render`.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use sd_skills::{Skill, SkillIndex};
use sd_tui::view::{lines_to_plain, single_line};
use sd_tui::{rank_matches, render_suggestions, SuggestSettings, SuggestionLayout, SuggestionState, Theme};

use crate::Session;

#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Print the index as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn run(self, session: &Session, out: &mut impl Write) -> Result<()> {
        let index = session.load_index();
        write_index(out, &index, self.json)
    }
}

pub fn write_index(out: &mut impl Write, index: &SkillIndex, json: bool) -> Result<()> {
    if json {
        let skills: Vec<&Skill> = index.iter().map(|skill| skill.as_ref()).collect();
        serde_json::to_writer_pretty(&mut *out, &skills)?;
        writeln!(out)?;
        return Ok(());
    }
    for skill in index.iter() {
        writeln!(
            out,
            "{}  ({})  {}",
            skill.name,
            skill.source,
            single_line(&skill.description)
        )?;
    }
    Ok(())
}

#[derive(Args, Clone, Debug)]
pub struct RenderArgs {
    /// Text typed after `$`
    #[arg(long, default_value = "")]
    pub query: String,
    /// Terminal width in columns
    #[arg(long, default_value_t = 80)]
    pub width: u16,
    /// Zero-based selected row; clamped to the match count
    #[arg(long, default_value_t = 0)]
    pub selected: usize,
}

impl RenderArgs {
    pub fn run(self, session: &Session, out: &mut impl Write) -> Result<()> {
        let settings = SuggestSettings::from_config(&session.config).context("invalid keymap")?;
        let index = session.load_index();
        let layout = SuggestionLayout {
            max_visible: settings.max_visible,
            show_source: settings.show_source,
        };
        for line in render_plain(&self, &index, &layout) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// The popup for `args.query` as unstyled text, one string per row.
pub fn render_plain(args: &RenderArgs, index: &SkillIndex, layout: &SuggestionLayout) -> Vec<String> {
    let matches = rank_matches(&args.query, index);
    let state = SuggestionState::new(Some(args.query.clone()), matches, args.selected);
    lines_to_plain(&render_suggestions(
        args.width,
        state.matches(),
        state.selected_index(),
        layout,
        &Theme::plain(),
    ))
}
