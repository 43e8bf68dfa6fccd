//! Lexer
//!
//!     Turns Python source text into the token stream the reconstructor walks over.
//!
//!     The pipeline has two layers:
//!         1. Raw lexemes are recognized by a logos lexer, see
//!            [base_tokenization](base_tokenization).
//!         2. The [line tokenizer](line_tokenizer) feeds physical lines through it and
//!            adds everything that needs state across lines: INDENT/DEDENT, NEWLINE vs NL,
//!            bracket depth, backslash continuations and multi-line strings.
//!
//!     Tokens borrow their text from the source. Positions are (row, column) with 1-based
//!     rows and byte columns, so the gap between two tokens on a line can be sliced back
//!     out of the token's own source line.

pub mod base_tokenization;
pub mod common;
pub mod line_tokenizer;

pub use common::{LexError, Lexer};
pub use line_tokenizer::PythonLexer;

use crate::token::Token;

/// Tokenize Python source with the default lexer.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    PythonLexer.lex(source)
}
