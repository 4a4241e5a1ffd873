//! Line-oriented tokenizer for Python-style source.
//!
//! The scanner walks physical lines, tracks indentation, bracket nesting and
//! strings that span lines, and uses the automata in [`tables`] to find the
//! extent of each token. The whole token list is produced eagerly.
//!
//! Positions follow the usual conventions: lines are 1-based, token columns
//! are 0-based byte offsets. Error columns are 1-based.

mod tables;

#[cfg(test)]
mod lexer_tests;

use std::sync::Arc;

use resync_core::{Automaton, Token, TokenKind};

use tables::{
    DOUBLE_QUOTE_END, DOUBLE_TRIPLE_END, PSEUDO_TOKEN, SINGLE_QUOTE_END, SINGLE_TRIPLE_END,
    WHITESPACE,
};

const TAB_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Malformed token, unbalanced bracket or unterminated literal.
    Token,
    /// Dedent to a column that no enclosing block uses.
    Indentation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (line {line}, column {column})")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    /// Text of the line the error points into.
    pub source_line: Arc<str>,
    pub line: u32,
    /// 1-based.
    pub column: u32,
}

impl LexError {
    fn token(message: impl Into<String>, source_line: &Arc<str>, line: u32, column: usize) -> Self {
        Self {
            kind: LexErrorKind::Token,
            message: message.into(),
            source_line: source_line.clone(),
            line,
            column: column as u32,
        }
    }
}

/// Tokenizer options.
#[derive(Debug, Clone, Copy)]
pub struct LexOptions {
    imply_dedent: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self { imply_dedent: true }
    }
}

impl LexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize the missing final NEWLINE and the DEDENTs of still-open
    /// blocks at end of input.
    pub fn imply_dedent(mut self, imply: bool) -> Self {
        self.imply_dedent = imply;
        self
    }

    pub fn get_imply_dedent(&self) -> bool {
        self.imply_dedent
    }
}

/// Split `source` into physical lines, keeping each line's terminator.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn split_lines(source: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < source.len() {
        match source[i] {
            b'\n' => {
                lines.push(&source[start..=i]);
                start = i + 1;
            }
            b'\r' => {
                if source.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                lines.push(&source[start..=i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < source.len() {
        lines.push(&source[start..]);
    }
    lines
}

/// Tokenize a whole source buffer.
///
/// An extra blank line is fed after the source, so the synthesized trailing
/// tokens land on the line after the last one.
pub fn tokenize(source: &[u8], options: LexOptions) -> Result<Vec<Token>, LexError> {
    let mut lines = split_lines(source);
    lines.push(b"\n");
    tokenize_lines(lines, options)
}

/// Tokenize pre-split physical lines.
pub fn tokenize_lines<'a>(
    lines: impl IntoIterator<Item = &'a [u8]>,
    options: LexOptions,
) -> Result<Vec<Token>, LexError> {
    Lexer::new(options).run(lines)
}

/// `\r\n` and a trailing `\r` become `\n`.
fn universal_newline(line: &[u8]) -> Vec<u8> {
    if let Some(body) = line.strip_suffix(b"\r\n") {
        let mut out = body.to_vec();
        out.push(b'\n');
        return out;
    }
    if let Some(body) = line.strip_suffix(b"\r") {
        let mut out = body.to_vec();
        out.push(b'\n');
        return out;
    }
    line.to_vec()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Length of a `[uUbB]?[rR]?` string prefix.
fn string_prefix_len(token: &[u8]) -> usize {
    let mut len = 0;
    if matches!(token.first(), Some(b'u' | b'U' | b'b' | b'B')) {
        len += 1;
    }
    if matches!(token.get(len), Some(b'r' | b'R')) {
        len += 1;
    }
    len
}

fn is_quote(byte: u8) -> bool {
    byte == b'\'' || byte == b'"'
}

fn string_end(quote: u8, triple: bool) -> &'static Automaton {
    match (quote, triple) {
        (b'"', true) => &DOUBLE_TRIPLE_END,
        (_, true) => &SINGLE_TRIPLE_END,
        (b'"', false) => &DOUBLE_QUOTE_END,
        (_, false) => &SINGLE_QUOTE_END,
    }
}

fn closes(opening: u8, closing: u8) -> bool {
    matches!((opening, closing), (b'(', b')') | (b'[', b']') | (b'{', b'}'))
}

struct Bracket {
    byte: u8,
    line: u32,
    column: usize,
    source_line: Arc<str>,
}

/// A string literal still open at the end of a line.
struct ContinuedString {
    text: Vec<u8>,
    line: u32,
    column: usize,
    source_line: Arc<str>,
    end: &'static Automaton,
    /// Single-quoted strings only continue across a backslash-newline.
    needs_backslash: bool,
}

struct Lexer {
    options: LexOptions,
    tokens: Vec<Token>,
    indents: Vec<usize>,
    brackets: Vec<Bracket>,
    last_comment: String,
    continued: bool,
    string: Option<ContinuedString>,
}

impl Lexer {
    fn new(options: LexOptions) -> Self {
        Self {
            options,
            tokens: Vec::new(),
            indents: vec![0],
            brackets: Vec::new(),
            last_comment: String::new(),
            continued: false,
            string: None,
        }
    }

    fn push(&mut self, kind: TokenKind, value: String, line: u32, column: usize, src: &Arc<str>) {
        self.tokens
            .push(Token::new(kind, value, line, column as u32, src.clone()));
        self.last_comment.clear();
    }

    fn run<'a>(mut self, lines: impl IntoIterator<Item = &'a [u8]>) -> Result<Vec<Token>, LexError> {
        let mut lnum = 0u32;
        let mut pos = 0usize;
        let mut src: Arc<str> = Arc::from("");

        // The trailing empty line marks end of input.
        let lines = lines
            .into_iter()
            .map(universal_newline)
            .chain(std::iter::once(Vec::new()));

        for line in lines {
            lnum += 1;
            pos = 0;
            src = Arc::from(text(&line));
            let max = line.len();

            if let Some(mut string) = self.string.take() {
                if line.is_empty() {
                    return Err(LexError::token(
                        "end of file (EOF) while scanning triple-quoted string literal",
                        &string.source_line,
                        string.line,
                        string.column + 1,
                    ));
                }
                match string.end.recognize(&line, 0) {
                    Some(end) => {
                        pos = end;
                        string.text.extend_from_slice(&line[..end]);
                        let value = text(&string.text);
                        self.push(TokenKind::String, value, string.line, string.column, &src);
                    }
                    None if string.needs_backslash && !line.ends_with(b"\\\n") => {
                        string.text.extend_from_slice(&line);
                        let value = text(&string.text);
                        self.push(TokenKind::ErrorToken, value, string.line, string.column, &src);
                        continue;
                    }
                    None => {
                        string.text.extend_from_slice(&line);
                        self.string = Some(string);
                        continue;
                    }
                }
            } else if self.brackets.is_empty() && !self.continued {
                if line.is_empty() {
                    break;
                }
                let mut column = 0;
                while pos < max {
                    match line[pos] {
                        b' ' => column += 1,
                        b'\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
                        b'\x0c' => column = 0,
                        _ => break,
                    }
                    pos += 1;
                }
                if pos == max {
                    break;
                }
                if matches!(line[pos], b'#' | b'\r' | b'\n') {
                    continue;
                }
                self.indent(column, &line[..pos], lnum, pos, &src)?;
            } else {
                if line.is_empty() {
                    if let Some(open) = self.brackets.first() {
                        return Err(LexError::token(
                            "parenthesis is never closed",
                            &open.source_line,
                            open.line,
                            open.column + 1,
                        ));
                    }
                    return Err(LexError::token(
                        "end of file (EOF) in multi-line statement",
                        &src,
                        lnum,
                        0,
                    ));
                }
                self.continued = false;
            }

            while pos < max {
                match self.scan(&line, pos, lnum, &src)? {
                    Some(next) => pos = next,
                    None => break,
                }
            }
        }

        let lnum = lnum - 1;
        let eof_line: Arc<str> = Arc::from("\n");
        if self.options.imply_dedent {
            if self
                .tokens
                .last()
                .is_some_and(|t| t.kind != TokenKind::Newline)
            {
                self.push(TokenKind::Newline, String::new(), lnum, 0, &eof_line);
            }
            for _ in 1..self.indents.len() {
                self.push(TokenKind::Dedent, String::new(), lnum, pos, &src);
            }
        }
        self.push(TokenKind::Newline, String::new(), lnum, 0, &eof_line);
        self.push(TokenKind::EndMarker, String::new(), lnum, pos, &src);
        Ok(self.tokens)
    }

    fn indent(
        &mut self,
        column: usize,
        prefix: &[u8],
        lnum: u32,
        pos: usize,
        src: &Arc<str>,
    ) -> Result<(), LexError> {
        let top = self.indents.last().copied().unwrap_or(0);
        if column > top {
            self.indents.push(column);
            self.push(TokenKind::Indent, text(prefix), lnum, 0, src);
        }
        while self.indents.last().is_some_and(|&level| column < level) {
            self.indents.pop();
            self.push(TokenKind::Dedent, String::new(), lnum, pos, src);
        }
        if self.indents.last() != Some(&column) {
            return Err(LexError {
                kind: LexErrorKind::Indentation,
                message: "unindent does not match any outer indentation level".to_owned(),
                source_line: src.clone(),
                line: lnum,
                column: column as u32 + 1,
            });
        }
        Ok(())
    }

    /// Scan one token starting at `pos`. Returns the position to continue
    /// from, or `None` when the rest of the line belongs to an open string.
    fn scan(
        &mut self,
        line: &[u8],
        pos: usize,
        lnum: u32,
        src: &Arc<str>,
    ) -> Result<Option<usize>, LexError> {
        let start = WHITESPACE.recognize(line, pos).unwrap_or(pos);

        let Some(end) = PSEUDO_TOKEN.recognize(line, pos) else {
            if start < line.len() && is_quote(line[start]) {
                return Err(LexError::token(
                    "end of line (EOL) while scanning string literal",
                    src,
                    lnum,
                    start + 1,
                ));
            }
            self.push(TokenKind::ErrorToken, text(&line[pos..=pos]), lnum, pos, src);
            return Ok(Some(pos + 1));
        };

        if start >= end {
            return Err(LexError::token("Unknown character", src, lnum, start + 1));
        }

        let token = &line[start..end];
        let initial = token[0];
        let rest = &token[string_prefix_len(token)..];

        if initial.is_ascii_digit() || (initial == b'.' && token != b".") {
            self.push(TokenKind::Number, text(token), lnum, start, src);
        } else if initial == b'\r' || initial == b'\n' {
            let comment = std::mem::take(&mut self.last_comment);
            if self.brackets.is_empty() {
                self.push(TokenKind::Newline, comment, lnum, start, src);
            }
        } else if initial == b'#' {
            self.last_comment = text(token);
        } else if rest == b"'''" || rest == b"\"\"\"" {
            let end_dfa = string_end(rest[0], true);
            match end_dfa.recognize(line, end) {
                Some(close) => {
                    self.push(TokenKind::String, text(&line[start..close]), lnum, start, src);
                    return Ok(Some(close));
                }
                None => {
                    self.open_string(line, start, lnum, src, end_dfa, false);
                    return Ok(None);
                }
            }
        } else if rest.first().copied().is_some_and(is_quote) {
            if token.ends_with(b"\n") {
                self.open_string(line, start, lnum, src, string_end(rest[0], false), true);
                return Ok(None);
            }
            self.push(TokenKind::String, text(token), lnum, start, src);
        } else if initial.is_ascii_alphabetic() || initial == b'_' {
            self.push(TokenKind::Name, text(token), lnum, start, src);
        } else if initial == b'\\' {
            self.continued = true;
        } else {
            self.bracket(initial, lnum, start, src)?;
            let kind = TokenKind::from_operator(token).unwrap_or(TokenKind::Op);
            self.push(kind, text(token), lnum, start, src);
        }
        Ok(Some(end))
    }

    fn open_string(
        &mut self,
        line: &[u8],
        start: usize,
        lnum: u32,
        src: &Arc<str>,
        end: &'static Automaton,
        needs_backslash: bool,
    ) {
        self.string = Some(ContinuedString {
            text: line[start..].to_vec(),
            line: lnum,
            column: start,
            source_line: src.clone(),
            end,
            needs_backslash,
        });
    }

    fn bracket(&mut self, byte: u8, lnum: u32, start: usize, src: &Arc<str>) -> Result<(), LexError> {
        match byte {
            b'(' | b'[' | b'{' => self.brackets.push(Bracket {
                byte,
                line: lnum,
                column: start,
                source_line: src.clone(),
            }),
            b')' | b']' | b'}' => {
                let closing = byte as char;
                let Some(open) = self.brackets.pop() else {
                    return Err(LexError::token(
                        format!("unmatched '{closing}'"),
                        src,
                        lnum,
                        start + 1,
                    ));
                };
                if !closes(open.byte, byte) {
                    let mut message = format!(
                        "closing parenthesis '{closing}' does not match opening parenthesis '{}'",
                        open.byte as char
                    );
                    if open.line != lnum {
                        message.push_str(&format!(" on line {}", open.line));
                    }
                    return Err(LexError::token(message, src, lnum, start + 1));
                }
            }
            _ => {}
        }
        Ok(())
    }
}
