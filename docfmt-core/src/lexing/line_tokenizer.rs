//! Line tokenizer for Python source
//!
//!     Produces the same token stream shape as Python's own `tokenize` module: one
//!     physical line at a time, with INDENT/DEDENT tokens emitted at the start of each
//!     logical line, NEWLINE ending logical lines and NL standing for line breaks that do
//!     not (blank lines, comment lines, breaks inside brackets).
//!
//! State carried across lines
//!
//!     - the indentation stack (measured in columns, tabs advance to the next multiple of 8)
//!     - the bracket depth, which suppresses indentation handling and turns line breaks
//!       into NL
//!     - the continuation flag set by a trailing backslash
//!     - a pending string literal, when a triple-quoted string (or a single-quoted one
//!       ending in backslash-newline) runs past the end of the line
//!
//! Divergences from the Python tokenizer
//!
//!     Columns are byte offsets. A whitespace-only last line without a line break yields
//!     an empty NL token instead of being dropped, so that its bytes can be reproduced.

use super::base_tokenization::{next_raw_token, RawToken};
use super::common::{LexError, Lexer};
use crate::token::{Position, Token, TokenKind};

/// Tokenizer for Python source text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonLexer;

impl Lexer for PythonLexer {
    fn lex<'src>(&self, source: &'src str) -> Result<Vec<Token<'src>>, LexError> {
        LineTokenizer::new(source).run()
    }
}

/// Closing delimiter of a string literal that is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Triple(u8),
    Single(u8),
}

/// A string literal whose body continues on the following lines.
#[derive(Debug, Clone, Copy)]
struct PendingString {
    delimiter: Delimiter,
    start: Position,
    /// Byte offset of the literal's first character in the source
    start_offset: usize,
    /// Byte offset of the physical line the literal starts on
    line_offset: usize,
}

/// Outcome of scanning a string body.
#[derive(Debug, PartialEq, Eq)]
enum StringEnd {
    /// Closed; the byte offset just past the closing delimiter
    Closed(usize),
    /// The body continues on the next line
    Continues,
    /// A single-quoted body hit a bare line break
    Unterminated,
}

struct LineTokenizer<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
    indents: Vec<usize>,
    paren_depth: usize,
    continued: bool,
    pending: Option<PendingString>,
}

impl<'src> LineTokenizer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            indents: vec![0],
            paren_depth: 0,
            continued: false,
            pending: None,
        }
    }

    fn run(mut self) -> Result<Vec<Token<'src>>, LexError> {
        let mut row = 0;
        let mut offset = 0;
        let mut last_line = "";

        for line in self.source.split_inclusive('\n') {
            row += 1;
            self.physical_line(row, offset, line)?;
            offset += line.len();
            last_line = line;
        }

        self.finish(row, last_line)?;
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, text: &'src str, start: Position, end: Position, line: &'src str) {
        self.tokens.push(Token::new(kind, text, start, end, line));
    }

    fn physical_line(&mut self, row: usize, offset: usize, line: &'src str) -> Result<(), LexError> {
        let mut pos = 0;

        if let Some(pending) = self.pending.take() {
            match scan_string_body(line, 0, pending.delimiter) {
                StringEnd::Closed(end) => {
                    let source = self.source;
                    let text = &source[pending.start_offset..offset + end];
                    let lines = &source[pending.line_offset..offset + line.len()];
                    self.push(TokenKind::String, text, pending.start, Position::new(row, end), lines);
                    pos = end;
                }
                StringEnd::Continues => {
                    self.pending = Some(pending);
                    return Ok(());
                }
                StringEnd::Unterminated => {
                    return Err(LexError::UnterminatedString {
                        position: pending.start,
                    });
                }
            }
        } else if self.paren_depth == 0 && !self.continued {
            let (indent_end, column) = measure_indent(line);
            pos = indent_end;
            let rest = &line[pos..];
            if rest.is_empty() || rest.starts_with(['#', '\r', '\n']) {
                self.blank_line(row, line, pos);
                return Ok(());
            }
            self.indentation(row, line, pos, column)?;
        } else {
            self.continued = false;
        }

        self.scan(row, offset, line, pos)
    }

    /// Blank and comment-only lines never affect indentation.
    fn blank_line(&mut self, row: usize, line: &'src str, mut pos: usize) {
        if line[pos..].starts_with('#') {
            let comment = line[pos..].trim_end_matches(['\r', '\n']);
            let end = pos + comment.len();
            self.push(TokenKind::Comment, comment, Position::new(row, pos), Position::new(row, end), line);
            pos = end;
        }
        self.push(
            TokenKind::Nl,
            &line[pos..],
            Position::new(row, pos),
            Position::new(row, line.len()),
            line,
        );
    }

    fn indentation(&mut self, row: usize, line: &'src str, pos: usize, column: usize) -> Result<(), LexError> {
        let current = self.indents.last().copied().unwrap_or(0);
        if column > current {
            self.indents.push(column);
            self.push(TokenKind::Indent, &line[..pos], Position::new(row, 0), Position::new(row, pos), line);
            return Ok(());
        }

        while column < self.indents.last().copied().unwrap_or(0) {
            if !self.indents.contains(&column) {
                return Err(LexError::InconsistentDedent {
                    position: Position::new(row, pos),
                });
            }
            self.indents.pop();
            self.push(TokenKind::Dedent, "", Position::new(row, pos), Position::new(row, pos), line);
        }
        Ok(())
    }

    fn scan(&mut self, row: usize, offset: usize, line: &'src str, mut pos: usize) -> Result<(), LexError> {
        while pos < line.len() {
            let Some(next) = next_raw_token(&line[pos..]) else {
                break;
            };
            let (raw, span) = next.map_err(|at| unexpected_character(line, row, pos + at))?;
            let start = pos + span.start;
            let end = pos + span.end;
            let text = &line[start..end];
            let start_pos = Position::new(row, start);

            let kind = match raw {
                RawToken::Continuation => {
                    self.continued = true;
                    return Ok(());
                }
                RawToken::TripleQuote | RawToken::Quote => {
                    let quote = line.as_bytes()[end - 1];
                    let delimiter = if raw == RawToken::TripleQuote {
                        Delimiter::Triple(quote)
                    } else {
                        Delimiter::Single(quote)
                    };
                    match scan_string_body(line, end, delimiter) {
                        StringEnd::Closed(close) => {
                            self.push(TokenKind::String, &line[start..close], start_pos, Position::new(row, close), line);
                            pos = close;
                            continue;
                        }
                        StringEnd::Continues => {
                            self.pending = Some(PendingString {
                                delimiter,
                                start: start_pos,
                                start_offset: offset + start,
                                line_offset: offset,
                            });
                            return Ok(());
                        }
                        StringEnd::Unterminated => {
                            return Err(LexError::UnterminatedString { position: start_pos });
                        }
                    }
                }
                RawToken::Newline if self.paren_depth > 0 => TokenKind::Nl,
                RawToken::Newline => TokenKind::Newline,
                RawToken::Comment => TokenKind::Comment,
                RawToken::Name => TokenKind::Name,
                RawToken::Number => TokenKind::Number,
                RawToken::OpenBracket => {
                    self.paren_depth += 1;
                    TokenKind::Op
                }
                RawToken::CloseBracket => {
                    self.paren_depth = self.paren_depth.saturating_sub(1);
                    TokenKind::Op
                }
                RawToken::Op => TokenKind::Op,
            };

            self.push(kind, text, start_pos, Position::new(row, end), line);
            pos = end;
        }
        Ok(())
    }

    /// Closes the stream: implicit NEWLINE, remaining DEDENTs and the ENDMARKER.
    fn finish(&mut self, last_row: usize, last_line: &'src str) -> Result<(), LexError> {
        let row = last_row + 1;
        if let Some(pending) = self.pending {
            return Err(LexError::EofInString {
                position: pending.start,
            });
        }
        if self.paren_depth > 0 || self.continued {
            return Err(LexError::EofInStatement {
                position: Position::new(row, 0),
            });
        }

        let ends_logical_line = matches!(
            self.tokens.last().map(|t| t.kind),
            None | Some(TokenKind::Newline) | Some(TokenKind::Nl)
        );
        if !last_line.is_empty() && !last_line.ends_with(['\n', '\r']) && !ends_logical_line {
            let end = Position::new(last_row, last_line.len());
            self.push(TokenKind::Newline, "", end, end, last_line);
        }

        let origin = Position::new(row, 0);
        for _ in 1..self.indents.len() {
            self.push(TokenKind::Dedent, "", origin, origin, "");
        }
        self.indents.truncate(1);
        self.push(TokenKind::EndMarker, "", origin, origin, "");
        Ok(())
    }
}

/// Measure leading whitespace. Returns the byte length and the column it amounts to.
fn measure_indent(line: &str) -> (usize, usize) {
    let mut column = 0;
    let mut pos = 0;
    for byte in line.bytes() {
        match byte {
            b' ' => column += 1,
            b'\t' => column = (column / 8 + 1) * 8,
            b'\x0c' => column = 0,
            _ => break,
        }
        pos += 1;
    }
    (pos, column)
}

/// Scan a string body starting at `from`, honoring backslash escapes.
fn scan_string_body(line: &str, from: usize, delimiter: Delimiter) -> StringEnd {
    let bytes = line.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match (bytes[i], delimiter) {
            (b'\\', Delimiter::Single(_)) if is_line_break(&bytes[i + 1..]) => {
                return StringEnd::Continues;
            }
            (b'\\', _) => i += 2,
            (b'\n' | b'\r', Delimiter::Single(_)) => return StringEnd::Unterminated,
            (byte, Delimiter::Single(quote)) if byte == quote => return StringEnd::Closed(i + 1),
            (byte, Delimiter::Triple(quote)) if byte == quote && bytes[i..].starts_with(&[quote; 3]) => {
                return StringEnd::Closed(i + 3);
            }
            _ => i += 1,
        }
    }
    match delimiter {
        Delimiter::Triple(_) => StringEnd::Continues,
        Delimiter::Single(_) => StringEnd::Unterminated,
    }
}

fn is_line_break(rest: &[u8]) -> bool {
    rest == b"\n" || rest == b"\r\n"
}

fn unexpected_character(line: &str, row: usize, at: usize) -> LexError {
    LexError::UnexpectedCharacter {
        found: line[at..].chars().next().unwrap_or('\0'),
        position: Position::new(row, at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token<'_>> {
        PythonLexer.lex(source).expect("source should lex")
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndMarker);
        assert_eq!(tokens[0].start, Position::new(1, 0));
    }

    #[test]
    fn test_indent_and_dedent() {
        use TokenKind::*;
        assert_eq!(
            kinds("if x:\n    y\nz\n"),
            vec![Name, Name, Op, Newline, Indent, Name, Newline, Dedent, Name, Newline, EndMarker]
        );
    }

    #[test]
    fn test_indent_token_carries_whitespace() {
        let tokens = lex("def f():\n\t  pass\n");
        let indent = tokens.iter().find(|t| t.kind == TokenKind::Indent).unwrap();
        assert_eq!(indent.text, "\t  ");
        assert_eq!(indent.start, Position::new(2, 0));
        assert_eq!(indent.end, Position::new(2, 3));
    }

    #[test]
    fn test_dedent_positions_point_at_first_token() {
        let tokens = lex("if a:\n    if b:\n        c\n    d\n");
        let dedent = tokens.iter().find(|t| t.kind == TokenKind::Dedent).unwrap();
        assert_eq!(dedent.start, Position::new(4, 4));
        assert_eq!(dedent.line, "    d\n");
    }

    #[test]
    fn test_blank_and_comment_lines_are_nl() {
        use TokenKind::*;
        assert_eq!(
            kinds("x\n\n  # note\ny\n"),
            vec![Name, Newline, Nl, Comment, Nl, Name, Newline, EndMarker]
        );
    }

    #[test]
    fn test_brackets_suppress_newline_and_indentation() {
        use TokenKind::*;
        assert_eq!(
            kinds("f(a,\n        b)\n"),
            vec![Name, Op, Name, Op, Nl, Name, Op, Newline, EndMarker]
        );
    }

    #[test]
    fn test_triple_quoted_string_spanning_lines() {
        let source = "x = '''a\nb\n'''  # c\n";
        let tokens = lex(source);
        let string = &tokens[2];
        assert_eq!(string.kind, TokenKind::String);
        assert_eq!(string.text, "'''a\nb\n'''");
        assert_eq!(string.start, Position::new(1, 4));
        assert_eq!(string.end, Position::new(3, 3));
        assert_eq!(string.line, source);
        assert_eq!(tokens[3].kind, TokenKind::Comment);
        assert_eq!(tokens[3].start, Position::new(3, 5));
    }

    #[test]
    fn test_escaped_quotes_do_not_close_strings() {
        let tokens = lex("s = 'it\\'s'\nt = \"\"\"a\\\"\"\"b\"\"\"\n");
        assert_eq!(tokens[2].text, "'it\\'s'");
        assert_eq!(tokens[6].text, "\"\"\"a\\\"\"\"b\"\"\"");
    }

    #[test]
    fn test_single_quoted_string_with_escaped_newline() {
        let tokens = lex("s = 'a\\\nb'\n");
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, "'a\\\nb'");
        assert_eq!(tokens[2].end, Position::new(2, 2));
    }

    #[test]
    fn test_continuation_produces_no_token() {
        use TokenKind::*;
        let tokens = lex("x = 1 + \\\n    2\n");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Name, Op, Number, Op, Number, Newline, EndMarker]
        );
        assert_eq!(tokens[3].line, "x = 1 + \\\n");
        assert_eq!(tokens[4].start, Position::new(2, 4));
    }

    #[test]
    fn test_implicit_newline_at_eof() {
        let tokens = lex("pass");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].text, "");
        assert_eq!(tokens[1].start, Position::new(1, 4));
    }

    #[test]
    fn test_trailing_whitespace_line_without_break() {
        let tokens = lex("x\n   ");
        let nl = tokens.iter().find(|t| t.kind == TokenKind::Nl).unwrap();
        assert_eq!(nl.start, Position::new(2, 3));
        assert_eq!(nl.text, "");
    }

    #[test]
    fn test_crlf_newlines() {
        let tokens = lex("x = 1\r\n");
        assert_eq!(tokens[3].kind, TokenKind::Newline);
        assert_eq!(tokens[3].text, "\r\n");
    }

    #[test]
    fn test_string_prefixes() {
        let tokens = lex("b = rb'\\d'\n");
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, "rb'\\d'");
    }

    #[test]
    fn test_unexpected_character() {
        let err = PythonLexer.lex("x = $\n").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                found: '$',
                position: Position::new(1, 4)
            }
        );
    }

    #[test]
    fn test_unterminated_single_quoted_string() {
        let err = PythonLexer.lex("x = 'abc\n").unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { position: Position::new(1, 4) });
    }

    #[test]
    fn test_eof_in_multiline_string() {
        let err = PythonLexer.lex("def f():\n    '''never closed\n").unwrap_err();
        assert_eq!(err, LexError::EofInString { position: Position::new(2, 4) });
    }

    #[test]
    fn test_eof_in_multiline_statement() {
        let err = PythonLexer.lex("f(1,\n").unwrap_err();
        assert!(matches!(err, LexError::EofInStatement { .. }));
    }

    #[test]
    fn test_inconsistent_dedent() {
        let err = PythonLexer.lex("if x:\n        a\n    b\n").unwrap_err();
        assert_eq!(err, LexError::InconsistentDedent { position: Position::new(3, 4) });
    }

    #[test]
    fn test_measure_indent_expands_tabs() {
        assert_eq!(measure_indent("    x"), (4, 4));
        assert_eq!(measure_indent("\tx"), (1, 8));
        assert_eq!(measure_indent("  \tx"), (3, 8));
        assert_eq!(measure_indent("x"), (0, 0));
    }

    #[test]
    fn test_final_dedents_close_open_blocks() {
        let tokens = lex("class A:\n    def f(self):\n        pass\n");
        let tail: Vec<_> = tokens.iter().rev().take(3).map(|t| t.kind).collect();
        assert_eq!(tail, vec![TokenKind::EndMarker, TokenKind::Dedent, TokenKind::Dedent]);
        assert!(tokens.iter().rev().take(3).all(|t| t.start == Position::new(4, 0)));
    }
}
