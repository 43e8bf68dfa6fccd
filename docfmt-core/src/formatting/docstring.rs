//! Docstring normalization
//!
//!     Builds the canonical replacement text for one docstring token:
//!
//!     - always opened and closed with `"""`
//!     - the summary on the opening line, its lines joined and punctuated
//!     - when there is a description: a blank line, the description with flush-left
//!       lines brought to the docstring's indentation, another blank line and the
//!       closing quotes on their own line
//!
//!     Docstrings whose contents would collide with the canonical delimiter are returned
//!     untouched, quote style included.

use super::summary::{normalize_summary, split_lines, split_summary_and_description};
use crate::error::MalformedDocstring;
use std::borrow::Cow;
use tracing::debug;

const DOUBLE_TRIPLE: &str = "\"\"\"";
const SINGLE_TRIPLE: &str = "'''";

/// Return the formatted replacement for `docstring`, the raw token text with delimiters.
///
/// `indentation` is the whitespace the docstring is indented with; it prefixes the
/// closing quotes and flush-left description lines.
pub fn format_docstring(
    indentation: &str,
    docstring: &str,
    wrap_length: usize,
) -> Result<String, MalformedDocstring> {
    let contents = strip_docstring(docstring)?;

    if collides_with_delimiter(contents) {
        debug!("docstring contents collide with the closing quotes, leaving it as is");
        return Ok(docstring.to_string());
    }

    let (summary, description) = split_summary_and_description(contents);
    let summary = normalize_summary(&summary, wrap_length);

    if description.is_empty() {
        return Ok(format!("{DOUBLE_TRIPLE}{summary}{DOUBLE_TRIPLE}"));
    }

    let description = split_lines(&description)
        .into_iter()
        .map(|line| indent_non_indented(line, indentation).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "{DOUBLE_TRIPLE}{summary}\n\n{description}\n\n{indentation}{DOUBLE_TRIPLE}"
    ))
}

/// Return the contents between the delimiters, stripped of surrounding whitespace.
pub fn strip_docstring(docstring: &str) -> Result<&str, MalformedDocstring> {
    let triple = if docstring.trim_start().starts_with(SINGLE_TRIPLE) {
        if !docstring.trim_end().ends_with(SINGLE_TRIPLE) {
            return Err(MalformedDocstring);
        }
        SINGLE_TRIPLE
    } else {
        DOUBLE_TRIPLE
    };

    let (_, body) = docstring.split_once(triple).ok_or(MalformedDocstring)?;
    let body = body.rsplit_once(triple).map_or(body, |(inner, _)| inner);
    Ok(body.trim())
}

/// Prefix `line` with `indentation` unless it is already indented.
pub fn indent_non_indented<'a>(line: &'a str, indentation: &str) -> Cow<'a, str> {
    if line.trim_start() == line {
        Cow::Owned(format!("{indentation}{line}"))
    } else {
        Cow::Borrowed(line)
    }
}

/// Contents that cannot be wrapped in `"""` without changing the literal: a nested
/// `"""`, or a trailing `"` that would merge into the closing quotes.
fn collides_with_delimiter(contents: &str) -> bool {
    contents.contains(DOUBLE_TRIPLE) || contents.ends_with('"')
}
