//! Token stream reconstruction
//!
//!     Rebuilds the source text from its tokens, substituting formatted docstrings.
//!
//!     Tokens do not carry the whitespace between them, so the pass re-derives it from
//!     positions: the gap between the end of the previous token and the start of the
//!     current one is copied out of the current token's source line (or filled with
//!     spaces when that slice is not plain whitespace). A new row resets the baseline
//!     to column 0.
//!
//!     Backslash continuations are the one place where positions are not enough: the
//!     tokenizer joins the physical lines and emits no token for the `\` and the line
//!     break, so when a token lands on a later row and the previous token's line ended
//!     in a continuation, that line's trailing `\` run is emitted first.
//!
//!     All tracking state lives in a [`Pass`] threaded through a fold over the tokens;
//!     nothing survives between calls.

use crate::error::FormatError;
use crate::formatting::docstring::format_docstring;
use crate::lexing::{Lexer, PythonLexer};
use crate::token::{Position, Token, TokenKind};
use tracing::{debug, trace};

/// Rewrite every docstring in `source`, leaving all other bytes untouched.
///
/// `wrap_length` wraps summaries at that width; 0 disables wrapping.
pub fn reconstruct(source: &str, wrap_length: usize) -> Result<String, FormatError> {
    reconstruct_with(&PythonLexer, source, wrap_length)
}

/// Same as [`reconstruct`], driven by an arbitrary lexer.
pub fn reconstruct_with<L>(lexer: &L, source: &str, wrap_length: usize) -> Result<String, FormatError>
where
    L: Lexer + ?Sized,
{
    let tokens = lexer.lex(source)?;
    let pass = tokens
        .iter()
        .try_fold(Pass::new(source.len()), |pass, token| {
            pass.emit(token, wrap_length)
        })?;

    debug!(
        tokens = tokens.len(),
        docstrings = pass.rewritten,
        "reconstruction pass complete"
    );
    Ok(pass.output)
}

/// A string token that opens with triple quotes right after an INDENT.
pub fn is_docstring_candidate(previous: Option<&Token<'_>>, token: &Token<'_>) -> bool {
    token.is(TokenKind::String)
        && starts_with_triple(token.text)
        && previous.is_some_and(|p| p.is(TokenKind::Indent))
}

/// Check if the string starts with triple single or double quotes.
pub fn starts_with_triple(text: &str) -> bool {
    let text = text.trim();
    text.starts_with("\"\"\"") || text.starts_with("'''")
}

/// Loop-carried state of one reconstruction pass.
struct Pass<'t, 'src> {
    output: String,
    previous: Option<&'t Token<'src>>,
    last: Position,
    rewritten: usize,
}

impl<'t, 'src> Pass<'t, 'src> {
    fn new(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            previous: None,
            last: Position::default(),
            rewritten: 0,
        }
    }

    fn emit(mut self, token: &'t Token<'src>, wrap_length: usize) -> Result<Self, FormatError> {
        let new_row = token.start.row > self.last.row;

        if new_row {
            if let Some(tail) = self.previous.and_then(continuation_tail) {
                trace!(row = token.start.row, "restoring line continuation");
                self.output.push_str(tail);
            }
        }

        let baseline = if new_row { 0 } else { self.last.column };
        if token.start.column > baseline {
            push_gap(&mut self.output, token.line, baseline, token.start.column);
        }

        if is_docstring_candidate(self.previous, token) {
            let indentation = self.previous.map_or("", |p| p.text);
            let formatted = format_docstring(indentation, token.text, wrap_length).map_err(
                |source| FormatError::MalformedDocstring {
                    position: token.start,
                    source,
                },
            )?;
            if formatted != token.text {
                debug!(position = %token.start, "rewrote docstring");
                self.rewritten += 1;
            }
            self.output.push_str(&formatted);
        } else {
            self.output.push_str(token.text);
        }

        self.previous = Some(token);
        self.last = token.end;
        Ok(self)
    }
}

/// The trailing whitespace-and-backslash run of a line joined by a continuation.
///
/// Tokens that emit their own line break (NEWLINE, NL) never need one: a comment ending
/// in a backslash is followed by an NL that already carries the break.
fn continuation_tail<'src>(previous: &Token<'src>) -> Option<&'src str> {
    if matches!(previous.kind, TokenKind::Newline | TokenKind::Nl) {
        return None;
    }
    let line = previous.line;
    let continued = line.ends_with("\\\n") || line.ends_with("\\\r\n") || line.ends_with("\\\r");
    if !continued {
        return None;
    }
    let kept = line.trim_end_matches([' ', '\t', '\n', '\r', '\\']).len();
    Some(&line[kept..])
}

/// Emit the whitespace between columns `from` and `to` of `line`.
fn push_gap(output: &mut String, line: &str, from: usize, to: usize) {
    match line.get(from..to) {
        Some(gap) if gap.chars().all(|c| matches!(c, ' ' | '\t' | '\x0c')) => output.push_str(gap),
        _ => output.push_str(&" ".repeat(to - from)),
    }
}
