//! Token model
//!
//!     Tokens are produced by the [lexing](crate::lexing) stage and consumed by the
//!     [reconstructor](crate::formatting::reconstructor). They borrow everything from the
//!     source text: the literal text of the token and the physical line(s) it sits on.
//!
//!     Positions follow the Python tokenizer convention for rows (1-based) but count
//!     columns in bytes, so a position can always be used to slice the source line it
//!     refers to.

use serde::Serialize;
use std::fmt;

/// A row/column position in source text. Rows are 1-based, columns are byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Name,
    Number,
    String,
    Op,
    Comment,
    /// End of a logical line.
    Newline,
    /// Line break that does not end a logical line (blank lines, inside brackets).
    Nl,
    Indent,
    Dedent,
    #[serde(rename = "ENDMARKER")]
    EndMarker,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Op => "OP",
            TokenKind::Comment => "COMMENT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Nl => "NL",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::EndMarker => "ENDMARKER",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexical token.
///
/// `line` is the physical line the token starts on, including its line break. For
/// strings spanning several lines it covers every line the literal touches, which is
/// what the reconstructor inspects when looking for trailing continuation markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub start: Position,
    pub end: Position,
    pub line: &'src str,
}

impl<'src> Token<'src> {
    pub fn new(
        kind: TokenKind,
        text: &'src str,
        start: Position,
        end: Position,
        line: &'src str,
    ) -> Self {
        Self {
            kind,
            text,
            start,
            end,
            line,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {}-{}",
            self.kind, self.text, self.start, self.end
        )
    }
}
