//! Common lexer module
//!
//! Shared interfaces for lexer implementations. The reconstructor only depends on
//! [`Lexer`], so any tokenizer that honors the token contract can drive it.

use crate::token::{Position, Token};
use thiserror::Error;

/// Errors that can occur during lexing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character {found:?} at {position}")]
    UnexpectedCharacter { found: char, position: Position },

    #[error("unterminated string literal at {position}")]
    UnterminatedString { position: Position },

    #[error("EOF in multi-line string starting at {position}")]
    EofInString { position: Position },

    #[error("EOF in multi-line statement at {position}")]
    EofInStatement { position: Position },

    #[error("unindent does not match any outer indentation level at {position}")]
    InconsistentDedent { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::EofInString { position }
            | LexError::EofInStatement { position }
            | LexError::InconsistentDedent { position } => *position,
        }
    }
}

/// Trait for lexer implementations
///
/// Implementations must yield tokens in source order and keep row/column fidelity high
/// enough that the gaps between consecutive tokens can be rebuilt from positions alone.
pub trait Lexer {
    fn lex<'src>(&self, source: &'src str) -> Result<Vec<Token<'src>>, LexError>;
}
