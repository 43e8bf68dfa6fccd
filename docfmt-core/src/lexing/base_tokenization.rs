//! Core tokenization using the logos lexer
//!
//!     Logos recognizes the individual lexemes of a physical line: names, numbers,
//!     operators, comments, line breaks and string openers. Everything that needs state
//!     across lines (indentation, bracket depth, strings spanning several lines) is the
//!     job of the [line tokenizer](super::line_tokenizer), which restarts a logos lexer
//!     at each position it needs a lexeme from.
//!
//!     String literals are only recognized by their opening delimiter here. The body is
//!     scanned by hand since a triple-quoted body may run over many lines.

use logos::Logos;

/// Raw lexemes of a physical line. Horizontal whitespace is skipped.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\x0C]+")]
pub enum RawToken {
    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Name,

    #[regex(r"0[xX](_?[0-9a-fA-F])+|0[oO](_?[0-7])+|0[bB](_?[01])+")]
    #[regex(r"[0-9](_?[0-9])*(\.([0-9](_?[0-9])*)?)?([eE][+-]?[0-9](_?[0-9])*)?[jJ]?")]
    #[regex(r"\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?[jJ]?")]
    Number,

    // Optional string prefix followed by the opening delimiter
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?("""|''')"#)]
    TripleQuote,

    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?["']"#)]
    Quote,

    #[regex(r"#[^\r\n]*")]
    Comment,

    #[regex(r"\r?\n")]
    Newline,

    // Backslash line continuation
    #[regex(r"\\\r?\n")]
    Continuation,

    #[regex(r"[(\[{]")]
    OpenBracket,

    #[regex(r"[)\]}]")]
    CloseBracket,

    #[regex(r"\*\*=?|//=?|>>=?|<<=?|\.\.\.|->|:=|!=|[-+*/%&@|^=<>]=?|[~:;,.]")]
    Op,
}

/// Lex the first raw token of `text`, returning it with its byte span.
///
/// Returns `None` when only whitespace is left, `Some(Err(offset))` with the offset of
/// the offending character when no lexeme matches.
pub fn next_raw_token(text: &str) -> Option<Result<(RawToken, std::ops::Range<usize>), usize>> {
    let mut lexer = RawToken::lexer(text);
    let result = lexer.next()?;
    let span = lexer.span();
    Some(match result {
        Ok(token) => Ok((token, span)),
        Err(()) => Err(span.start),
    })
}
