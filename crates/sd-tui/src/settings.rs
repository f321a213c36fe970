// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Suggestion popup settings and key bindings.
//!
//! Bindings are written as `Up`, `Ctrl+N`, `Shift+Tab` or Emacs-style `C-n`
//! and resolved once into [`KeyMatcher`]s.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sd_config::{KeymapConfig, MentionPolicy, Placement, SkillDollarConfig};

pub const DEFAULT_MAX_VISIBLE: usize = 5;
pub const MAX_VISIBLE_LIMIT: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("shortcut must contain a key code, e.g. 'Enter' or 'Ctrl+Enter'")]
    MissingKey,
    #[error("unsupported modifier '{0}' - supported modifiers: Ctrl, Alt, Shift, Cmd")]
    UnsupportedModifier(String),
    #[error("unsupported key token '{0}'")]
    UnsupportedKey(String),
    #[error("keymap.{operation}: {source}")]
    Binding {
        operation: &'static str,
        #[source]
        source: Box<KeymapError>,
    },
}

/// Key matcher with required and tolerated modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatcher {
    pub code: KeyCode,
    pub required: KeyModifiers,
    pub optional: KeyModifiers,
    pub char_lower: Option<char>,
}

impl KeyMatcher {
    pub fn new(
        code: KeyCode,
        required: KeyModifiers,
        optional: KeyModifiers,
        char_lower: Option<char>,
    ) -> Self {
        Self {
            code,
            required,
            optional,
            char_lower,
        }
    }

    /// Shorthand for a key without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty(), KeyModifiers::empty(), None)
    }

    /// Parse `Ctrl+N`, `C-n`, `Shift+Tab`, `Esc`...
    pub fn parse(binding: &str) -> Result<Self, KeymapError> {
        let binding = binding.trim();
        if binding.is_empty() {
            return Err(KeymapError::MissingKey);
        }

        let mut required = KeyModifiers::empty();
        let mut parts: Vec<&str> = binding.split('+').collect();
        let mut key = parts.pop().unwrap_or_default();

        for part in parts {
            required |= parse_modifier(part)?;
        }

        // Emacs notation: C-n, M-x, C-S-p
        while let Some((prefix, rest)) = key.split_once('-') {
            if rest.is_empty() || prefix.chars().count() != 1 {
                break;
            }
            required |= parse_modifier(prefix)?;
            key = rest;
        }

        if key.is_empty() {
            return Err(KeymapError::MissingKey);
        }

        let (code, char_lower) = parse_key_token(key)?;
        let mut optional = KeyModifiers::empty();
        if matches!(code, KeyCode::Char(_)) && !required.contains(KeyModifiers::SHIFT) {
            optional |= KeyModifiers::SHIFT;
        }

        Ok(Self::new(code, required, optional, char_lower))
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !self.matches_code(&event.code) {
            return false;
        }

        for modifier in [
            KeyModifiers::CONTROL,
            KeyModifiers::ALT,
            KeyModifiers::SHIFT,
            KeyModifiers::SUPER,
        ] {
            let required = self.required.contains(modifier);
            let optional = self.optional.contains(modifier);
            let present = event.modifiers.contains(modifier);

            if required && !present {
                return false;
            }
            if !required && !optional && present {
                return false;
            }
        }

        true
    }

    fn matches_code(&self, code: &KeyCode) -> bool {
        match (&self.code, code) {
            (KeyCode::Char(expected), KeyCode::Char(actual)) => match self.char_lower {
                Some(lower) => actual.to_ascii_lowercase() == lower,
                None => actual == expected,
            },
            // Terminals report Shift+Tab as BackTab
            (KeyCode::Tab, KeyCode::BackTab) => self.required.contains(KeyModifiers::SHIFT),
            _ => self.code == *code,
        }
    }
}

impl std::fmt::Display for KeyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (modifier, label) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
            (KeyModifiers::SUPER, "Cmd+"),
        ] {
            if self.required.contains(modifier) {
                f.write_str(label)?;
            }
        }
        match &self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            other => write!(f, "{other:?}"),
        }
    }
}

fn parse_modifier(token: &str) -> Result<KeyModifiers, KeymapError> {
    match token.trim().to_lowercase().as_str() {
        "ctrl" | "control" | "c" => Ok(KeyModifiers::CONTROL),
        "alt" | "option" | "opt" | "m" => Ok(KeyModifiers::ALT),
        "shift" | "s" => Ok(KeyModifiers::SHIFT),
        "cmd" | "super" | "meta" | "win" => Ok(KeyModifiers::SUPER),
        _ => Err(KeymapError::UnsupportedModifier(token.to_string())),
    }
}

fn parse_key_token(token: &str) -> Result<(KeyCode, Option<char>), KeymapError> {
    let lower = token.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdown" => KeyCode::PageDown,
        _ => {
            let mut chars = token.chars();
            let (Some(first), None) = (chars.next(), chars.next()) else {
                return Err(KeymapError::UnsupportedKey(token.to_string()));
            };
            let lower = first.is_ascii_alphabetic().then(|| first.to_ascii_lowercase());
            return Ok((KeyCode::Char(lower.unwrap_or(first)), lower));
        }
    };
    Ok((code, None))
}

/// Popup operation a key maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestAction {
    SelectPrevious,
    SelectNext,
    Confirm,
    Dismiss,
}

/// Bindings for the popup operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestKeymap {
    pub select_previous: Vec<KeyMatcher>,
    pub select_next: Vec<KeyMatcher>,
    pub confirm_enter: Vec<KeyMatcher>,
    pub confirm_tab: Vec<KeyMatcher>,
    pub dismiss: Vec<KeyMatcher>,
}

impl Default for SuggestKeymap {
    fn default() -> Self {
        Self {
            select_previous: vec![KeyMatcher::plain(KeyCode::Up)],
            select_next: vec![KeyMatcher::plain(KeyCode::Down)],
            confirm_enter: vec![KeyMatcher::plain(KeyCode::Enter)],
            confirm_tab: vec![KeyMatcher::plain(KeyCode::Tab)],
            dismiss: vec![KeyMatcher::plain(KeyCode::Esc)],
        }
    }
}

impl SuggestKeymap {
    /// Defaults with any configured operation replaced.
    pub fn from_config(config: &KeymapConfig) -> Result<Self, KeymapError> {
        let mut keymap = Self::default();
        let overrides = [
            ("select-previous", &config.select_previous, &mut keymap.select_previous),
            ("select-next", &config.select_next, &mut keymap.select_next),
            ("confirm-enter", &config.confirm_enter, &mut keymap.confirm_enter),
            ("confirm-tab", &config.confirm_tab, &mut keymap.confirm_tab),
            ("dismiss", &config.dismiss, &mut keymap.dismiss),
        ];
        for (operation, configured, target) in overrides {
            let Some(bindings) = configured else {
                continue;
            };
            *target = bindings
                .iter()
                .map(|b| KeyMatcher::parse(b))
                .collect::<Result<_, _>>()
                .map_err(|source| KeymapError::Binding {
                    operation,
                    source: Box::new(source),
                })?;
        }
        Ok(keymap)
    }

    pub fn is_select_previous(&self, event: &KeyEvent) -> bool {
        self.select_previous.iter().any(|m| m.matches(event))
    }

    pub fn is_select_next(&self, event: &KeyEvent) -> bool {
        self.select_next.iter().any(|m| m.matches(event))
    }

    pub fn is_confirm_enter(&self, event: &KeyEvent) -> bool {
        self.confirm_enter.iter().any(|m| m.matches(event))
    }

    pub fn is_confirm_tab(&self, event: &KeyEvent) -> bool {
        self.confirm_tab.iter().any(|m| m.matches(event))
    }

    pub fn is_dismiss(&self, event: &KeyEvent) -> bool {
        self.dismiss.iter().any(|m| m.matches(event))
    }

    pub fn classify(&self, event: &KeyEvent) -> Option<SuggestAction> {
        if self.is_select_previous(event) {
            Some(SuggestAction::SelectPrevious)
        } else if self.is_select_next(event) {
            Some(SuggestAction::SelectNext)
        } else if self.is_confirm_enter(event) || self.is_confirm_tab(event) {
            Some(SuggestAction::Confirm)
        } else if self.is_dismiss(event) {
            Some(SuggestAction::Dismiss)
        } else {
            None
        }
    }
}

/// Resolved suggestion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestSettings {
    pub max_visible: usize,
    pub show_source: bool,
    pub placement: Placement,
    pub mention_policy: MentionPolicy,
    pub keymap: SuggestKeymap,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            show_source: true,
            placement: Placement::default(),
            mention_policy: MentionPolicy::default(),
            keymap: SuggestKeymap::default(),
        }
    }
}

impl SuggestSettings {
    pub fn from_config(config: &SkillDollarConfig) -> Result<Self, KeymapError> {
        let suggest = &config.suggest;
        Ok(Self {
            max_visible: suggest
                .max_visible
                .unwrap_or(DEFAULT_MAX_VISIBLE)
                .clamp(1, MAX_VISIBLE_LIMIT),
            show_source: suggest.show_source.unwrap_or(true),
            placement: suggest.placement.unwrap_or_default(),
            mention_policy: suggest.mention_policy.unwrap_or_default(),
            keymap: SuggestKeymap::from_config(&config.keymap)?,
        })
    }
}
