//! Errors surfaced by a reconstruction pass

use crate::lexing::LexError;
use crate::token::Position;
use thiserror::Error;

/// A docstring whose delimiters cannot be stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("docstring is not enclosed in matching triple quotes")]
pub struct MalformedDocstring;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unparseable source: {0}")]
    Unparseable(#[from] LexError),

    #[error("malformed docstring at {position}")]
    MalformedDocstring {
        position: Position,
        #[source]
        source: MalformedDocstring,
    },
}
