// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Interactive prompt session: a text area with `$skill` suggestions.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal};
use sd_skills::SkillIndex;
use serde::Serialize;
use tui_textarea::TextArea;

use crate::hook::{Directive, PromptHook};
use crate::host::WidgetSlots;
use crate::mention::mentioned_skills;
use crate::settings::SuggestSettings;
use crate::terminal::{TerminalConfig, TerminalGuard};
use crate::theme::Theme;
use crate::view::prompt::{render_prompt, style_prompt_textarea};
use crate::view_model::{ApplyOutcome, InputOutcome, PromptBuffer, SkillSuggestEditor};

/// A submitted prompt and what the submission hook made of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub prompt: String,
    pub skills: Vec<String>,
    pub directive: Option<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppExit {
    Submitted(Submission),
    Quit,
}

pub struct PromptApp {
    editor: SkillSuggestEditor<TextArea<'static>>,
    hook: PromptHook,
    slots: WidgetSlots,
    theme: Theme,
    status: Option<String>,
}

impl PromptApp {
    pub fn new(index: Arc<SkillIndex>, settings: &SuggestSettings, theme: Theme) -> Self {
        let mut textarea = TextArea::default();
        style_prompt_textarea(&mut textarea, &theme);
        Self {
            editor: SkillSuggestEditor::new(textarea, Arc::clone(&index), settings)
                .with_theme(theme.clone()),
            hook: PromptHook::new(index, settings.mention_policy),
            slots: WidgetSlots::new(),
            theme,
            status: None,
        }
    }

    pub fn editor(&self) -> &SkillSuggestEditor<TextArea<'static>> {
        &self.editor
    }

    pub fn slots(&self) -> &WidgetSlots {
        &self.slots
    }

    /// Swap the skill snapshot used by both the popup and the submit hook.
    pub fn replace_index(&mut self, index: Arc<SkillIndex>) {
        self.hook.replace_index(Arc::clone(&index));
        self.editor.replace_index(index, &mut self.slots);
    }

    /// Feed one key press. Returns `Some` when the session ends.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppExit> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => return Some(AppExit::Quit),
                KeyCode::Char('s') => return Some(AppExit::Submitted(self.submit())),
                _ => {}
            }
        }

        self.status = match self.editor.handle_input(key, &mut self.slots) {
            InputOutcome::Confirmed(ApplyOutcome::Stale { .. }) => {
                Some("Suggestion was out of date, nothing inserted".to_string())
            }
            _ => None,
        };
        None
    }

    fn submit(&self) -> Submission {
        let prompt = PromptBuffer::text(self.editor.buffer());
        let skills = mentioned_skills(&prompt, self.editor.index(), self.hook.policy())
            .iter()
            .map(|skill| skill.name.clone())
            .collect();
        let directive = self.hook.on_submit(&prompt);
        tracing::info!(has_directive = directive.is_some(), "prompt submitted");
        Submission {
            prompt,
            skills,
            directive,
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        render_prompt(
            frame,
            self.editor.buffer(),
            &self.slots,
            self.status.as_deref(),
            &self.theme,
        );
    }
}

/// Drive `app` on `terminal` until a key ends the session or `events` runs
/// out.
pub fn run_app<B, I>(terminal: &mut Terminal<B>, app: &mut PromptApp, events: I) -> Result<AppExit>
where
    B: Backend,
    I: IntoIterator<Item = io::Result<Event>>,
{
    terminal.draw(|frame| app.draw(frame)).context("failed to draw prompt")?;

    for event in events {
        let event = event.context("failed to read terminal event")?;
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if let Some(exit) = app.handle_key(key) {
                    return Ok(exit);
                }
            }
            Event::Paste(text) => {
                PromptBuffer::insert_str(app.editor.buffer_mut(), &text);
                app.editor.refresh(&mut app.slots);
            }
            Event::Resize(..) => {}
            _ => continue,
        }
        terminal.draw(|frame| app.draw(frame)).context("failed to draw prompt")?;
    }

    Ok(AppExit::Quit)
}

/// Run the interactive prompt on the real terminal.
pub fn run(mut app: PromptApp) -> Result<AppExit> {
    let _guard = TerminalGuard::new(&TerminalConfig::default())
        .context("failed to set up terminal")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to create terminal")?;
    terminal.clear()?;

    let events = std::iter::repeat_with(event::read);
    run_app(&mut terminal, &mut app, events)
}
