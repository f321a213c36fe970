// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Detection of an in-progress `$name` token ending at the cursor.

use once_cell::sync::Lazy;
use regex::Regex;

/// `$` followed by up to 64 name characters, ending at the cursor.
static TRIGGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([a-z0-9-]{0,64})$").unwrap());

/// Cursor position in characters. `line` indexes `\n`-separated lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<(usize, usize)> for Cursor {
    fn from((line, column): (usize, usize)) -> Self {
        Self { line, column }
    }
}

/// Query typed after a `$` immediately before the cursor, if any.
///
/// Returns `Some("")` right after a bare `$`. A `$name` elsewhere on the line
/// does not count, and a token never spans lines. Out-of-range lines read as
/// empty and a column past the end of the line reads the whole line.
pub fn detect_query(text: &str, cursor: Cursor) -> Option<String> {
    let line = text.split('\n').nth(cursor.line).unwrap_or("");
    let end = line
        .char_indices()
        .nth(cursor.column)
        .map(|(byte, _)| byte)
        .unwrap_or(line.len());
    let prefix = &line[..end];

    TRIGGER_RE
        .captures(prefix)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_end(text: &str) -> Option<String> {
        let lines: Vec<&str> = text.split('\n').collect();
        let line = lines.len() - 1;
        detect_query(text, Cursor::new(line, lines[line].chars().count()))
    }

    #[test]
    fn detects_query_before_cursor() {
        assert_eq!(at_end("please use $fo").as_deref(), Some("fo"));
        assert_eq!(at_end("$").as_deref(), Some(""));
        assert_eq!(at_end("cost $format-code-2").as_deref(), Some("format-code-2"));
        assert_eq!(at_end("first\nsecond $re").as_deref(), Some("re"));
    }

    #[test]
    fn rejects_tokens_not_touching_cursor() {
        assert_eq!(at_end("use $deploy now"), None);
        assert_eq!(at_end("no mention"), None);
        assert_eq!(at_end("$Deploy"), None);
        assert_eq!(at_end("$deploy_now"), None);
        assert_eq!(at_end("$deploy\n"), None);
    }

    #[test]
    fn cursor_in_middle_of_line() {
        let text = "use $deploy now";
        assert_eq!(detect_query(text, Cursor::new(0, 8)).as_deref(), Some("dep"));
        assert_eq!(detect_query(text, Cursor::new(0, 3)), None);
    }

    #[test]
    fn out_of_range_cursor_degrades() {
        assert_eq!(detect_query("$abc", Cursor::new(0, 99)).as_deref(), Some("abc"));
        assert_eq!(detect_query("$abc", Cursor::new(5, 0)), None);
        assert_eq!(detect_query("", Cursor::default()), None);
    }

    #[test]
    fn query_length_is_capped() {
        let ok = format!("${}", "a".repeat(64));
        let too_long = format!("${}", "a".repeat(65));
        assert_eq!(at_end(&ok).map(|q| q.len()), Some(64));
        assert_eq!(at_end(&too_long), None);
    }

    #[test]
    fn counts_columns_in_characters() {
        let text = "héllo $ab";
        assert_eq!(detect_query(text, Cursor::new(0, 9)).as_deref(), Some("ab"));
        assert_eq!(detect_query(text, Cursor::new(0, 8)).as_deref(), Some("a"));
    }
}
