//! Summary handling
//!
//!     Splitting docstring contents into a summary and a description, and normalizing the
//!     summary into a single punctuated line (optionally wrapped).
//!
//!     The splitter is a heuristic, not a sentence parser. The blank-line rule always runs
//!     first; only when it does not apply is the content cut at the first period followed
//!     by whitespace. Abbreviations such as "e.g. this" therefore end the summary early.

use super::wrap::wrap;
use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s").unwrap());
static LINE_BREAK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// Columns taken by the opening `"""` on the summary's first line.
const OPENING_QUOTES_WIDTH: usize = 3;

/// Split stripped docstring contents into `(summary, description)`.
pub fn split_summary_and_description(contents: &str) -> (String, String) {
    let lines = split_lines(contents);
    if lines.len() > 1 && lines[1].trim().is_empty() {
        return (lines[0].to_string(), lines[2..].join("\n"));
    }

    match SENTENCE_BREAK.find(contents) {
        Some(found) => (
            format!("{}.", contents[..found.start()].trim()),
            contents[found.end()..].trim().to_string(),
        ),
        None => (contents.trim().to_string(), String::new()),
    }
}

/// Join the summary's lines with single spaces, make sure it ends a sentence and
/// optionally wrap it.
///
/// Only whitespace runs that contain a line break are collapsed; spacing within a line
/// is kept.
///
/// `wrap_length` of 0 disables wrapping.
pub fn normalize_summary(summary: &str, wrap_length: usize) -> String {
    let mut summary = LINE_BREAK_RUN.replace_all(summary.trim(), " ").into_owned();

    if summary.chars().last().is_some_and(char::is_alphanumeric) {
        summary.push('.');
    }

    if wrap_length > 0 {
        let padded = format!("{}{summary}", " ".repeat(OPENING_QUOTES_WIDTH));
        summary = wrap(&padded, wrap_length).join("\n").trim().to_string();
    }

    summary
}

/// Split on every line boundary (`\n`, `\r\n`, `\r` and the Unicode separators).
///
/// A trailing line break does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let is_break = matches!(
            c,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
        );
        if !is_break {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
