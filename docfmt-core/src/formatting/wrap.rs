//! Greedy word wrapping
//!
//!     The text is cut into chunks (words and runs of spaces, with hyphenated words split
//!     after their hyphens) and lines are filled greedily. Whitespace at the start of a
//!     continuation line and at the end of any line is dropped; whitespace at the very
//!     start of the text is kept, which is what lets callers reserve columns on the first
//!     line by prepending spaces. Words longer than the width are broken, preferably after
//!     a hyphen.

const TAB_SIZE: usize = 8;

/// Wrap `text` into lines of at most `width` characters.
///
/// A width of 0 is treated as 1.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks: Vec<Vec<char>> = split_chunks(&normalize_whitespace(text))
        .into_iter()
        .rev()
        .map(|chunk| chunk.chars().collect())
        .collect();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<Vec<char>> = Vec::new();
        let mut line_len = 0;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.pop() {
            if line_len + chunk.len() > width {
                chunks.push(chunk);
                break;
            }
            line_len += chunk.len();
            line.push(chunk);
        }

        if chunks.last().is_some_and(|c| c.len() > width) {
            break_long_word(&mut chunks, &mut line, line_len, width);
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }

        if !line.is_empty() {
            lines.push(line.into_iter().flatten().collect());
        }
    }
    lines
}

fn break_long_word(chunks: &mut Vec<Vec<char>>, line: &mut Vec<Vec<char>>, line_len: usize, width: usize) {
    let space_left = width.saturating_sub(line_len);
    let Some(chunk) = chunks.last_mut() else {
        return;
    };

    let mut end = space_left;
    if chunk.len() > space_left {
        let hyphen = chunk[..space_left].iter().rposition(|&c| c == '-');
        if let Some(hyphen) = hyphen {
            if hyphen > 0 && chunk[..hyphen].iter().any(|&c| c != '-') {
                end = hyphen + 1;
            }
        }
    }
    let end = end.min(chunk.len());
    let rest = chunk.split_off(end);
    line.push(std::mem::replace(chunk, rest));
}

fn is_blank(chunk: &[char]) -> bool {
    chunk.iter().all(|&c| c == ' ')
}

/// Expand tabs and turn every ASCII whitespace character into a plain space.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = TAB_SIZE - column % TAB_SIZE;
                out.push_str(&" ".repeat(spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' => {
                out.push(' ');
                column += 1;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Split into alternating runs of spaces and words, breaking words after inner hyphens.
fn split_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, c) in text.char_indices() {
        let space = c == ' ';
        if in_space.is_some_and(|prev| prev != space) {
            push_run(&mut chunks, &text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        push_run(&mut chunks, &text[start..]);
    }
    chunks
}

fn push_run<'a>(chunks: &mut Vec<&'a str>, run: &'a str) {
    if run.starts_with(' ') {
        chunks.push(run);
    } else {
        chunks.extend(split_hyphenated(run));
    }
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Split after hyphens that join letters, e.g. `well-known` -> `well-`, `known`.
fn split_hyphenated(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let at = |i: usize| chars.get(i).map(|&(_, c)| c);
    let letter_at = |i: Option<usize>| i.and_then(at).is_some_and(is_letter);

    let mut parts = Vec::new();
    let mut start = 0;
    for (i, &(offset, c)) in chars.iter().enumerate() {
        if c != '-' {
            continue;
        }
        let two_letters_before = letter_at(i.checked_sub(1)) && letter_at(i.checked_sub(2));
        let hyphenated_before =
            letter_at(i.checked_sub(1)) && at(i.wrapping_sub(2)) == Some('-') && letter_at(i.checked_sub(3));
        let letters_after = letter_at(Some(i + 1))
            && (letter_at(Some(i + 2)) || (at(i + 2) == Some('-') && letter_at(Some(i + 3))));

        if (two_letters_before || hyphenated_before) && letters_after {
            let end = offset + c.len_utf8();
            parts.push(&word[start..end]);
            start = end;
        }
    }
    parts.push(&word[start..]);
    parts
}
