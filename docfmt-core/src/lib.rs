//! # docfmt-core
//!
//! Formats Python docstrings in place, leaving every other byte of the source alone.
//!
//! File Layout
//!
//!     src/
//!       ├── token.rs       Token kinds, positions and the borrowed token type
//!       ├── lexing/        Raw logos lexemes and the line-driven Python tokenizer
//!       ├── formatting/    Reconstruction pass and docstring normalization
//!       └── error.rs       Errors surfaced by a pass
//!
//! The single entry point for callers is [`reconstruct`]: it lexes the source, rebuilds it
//! token by token and swaps in the canonical form of every docstring (a triple-quoted
//! string that directly follows an INDENT). A pass either returns the full output or an
//! error; partial output is never produced.

pub mod error;
pub mod formatting;
pub mod lexing;
pub mod token;

pub use error::{FormatError, MalformedDocstring};
pub use formatting::{reconstruct, reconstruct_with};
pub use lexing::{tokenize, LexError, Lexer, PythonLexer};
pub use token::{Position, Token, TokenKind};
