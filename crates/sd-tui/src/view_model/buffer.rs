// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use ratatui::crossterm::event::KeyEvent;
use tui_textarea::TextArea;

use super::trigger::Cursor;

/// Editable prompt text with a cursor.
///
/// The suggestion editor only mutates the buffer through these primitives so
/// the host keeps its own undo, wrapping and cursor bookkeeping.
pub trait PromptBuffer {
    /// Full text, lines joined with `\n`.
    fn text(&self) -> String;

    fn cursor(&self) -> Cursor;

    /// Delete one character before the cursor, like Backspace.
    fn delete_char_backward(&mut self) -> bool;

    /// Insert `text` at the cursor and move the cursor past it.
    fn insert_str(&mut self, text: &str);

    /// Regular editor handling for a key. Returns true when the text changed.
    fn handle_input(&mut self, key: KeyEvent) -> bool;
}

impl PromptBuffer for TextArea<'_> {
    fn text(&self) -> String {
        self.lines().join("\n")
    }

    fn cursor(&self) -> Cursor {
        TextArea::cursor(self).into()
    }

    fn delete_char_backward(&mut self) -> bool {
        self.delete_char()
    }

    fn insert_str(&mut self, text: &str) {
        TextArea::insert_str(self, text);
    }

    fn handle_input(&mut self, key: KeyEvent) -> bool {
        self.input(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};
    use tui_textarea::CursorMove;

    #[test]
    fn textarea_exposes_text_and_cursor() {
        let mut textarea = TextArea::new(vec!["first".to_string(), "sec".to_string()]);
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        assert_eq!(PromptBuffer::text(&textarea), "first\nsec");
        assert_eq!(PromptBuffer::cursor(&textarea), Cursor::new(1, 3));

        assert!(textarea.delete_char_backward());
        PromptBuffer::insert_str(&mut textarea, "ond");
        assert_eq!(PromptBuffer::text(&textarea), "first\nseond");

        assert!(textarea.handle_input(KeyEvent::new(KeyCode::Char('!'), KeyModifiers::NONE)));
        assert_eq!(PromptBuffer::text(&textarea), "first\nseond!");
    }
}
