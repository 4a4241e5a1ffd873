//! Python-style syntax diagnostics.
//!
//! Parser and lexer errors are converted into [`SyntaxDiagnostic`]s carrying
//! the message Python would show, the offending source line and a 1-based
//! offset. They can be formatted as plain caret listings
//! ([`Diagnostics::format_messages`]) or rendered with source snippets
//! ([`DiagnosticsPrinter`]).

mod printer;


use std::fmt;
use std::sync::Arc;

use resync_compiler::{LexError, LexErrorKind};
use resync_core::{ClassifyError, Grammar, LabelTarget, Token, TokenKind};
use resync_vm::{Edit, ParseError};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::grammar::INDENTED_BLOCK_RULE;

pub use printer::DiagnosticsPrinter;

/// Shown between the first error and the ones found after repairing it.
pub const GUESSES_HEADER: &str = "\n___\nThere were possibly further errors, but they are guesses:\n(This is an experimental feature! if the errors are nonsense, please report a bug!)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxErrorKind {
    /// The parser rejected a token.
    InvalidSyntax,
    /// An indented block where none can start.
    UnexpectedIndent,
    /// A block header not followed by an indented block.
    ExpectedIndentedBlock,
    /// The tokenizer rejected the source.
    Lexical,
    /// A dedent to a column no enclosing block uses.
    Indentation,
}

impl SyntaxErrorKind {
    /// Python exception class this error corresponds to.
    pub fn exception_name(self) -> &'static str {
        match self {
            SyntaxErrorKind::InvalidSyntax | SyntaxErrorKind::Lexical => "SyntaxError",
            SyntaxErrorKind::UnexpectedIndent
            | SyntaxErrorKind::ExpectedIndentedBlock
            | SyntaxErrorKind::Indentation => "IndentationError",
        }
    }
}

/// One syntax error, as a Python user would see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub kind: SyntaxErrorKind,
    pub message: String,
    pub line: u32,
    /// 1-based byte offset into `text`.
    pub offset: u32,
    /// The physical source line, including its line terminator.
    pub text: Arc<str>,
    /// Found after an earlier error was repaired.
    pub guessed: bool,
    /// Edits the repair search made to get past this error.
    pub repair: Vec<Edit>,
}

impl SyntaxDiagnostic {
    pub fn from_parse_error(error: &ParseError, grammar: &Grammar) -> Self {
        let (kind, message) = if error.token.kind == TokenKind::Indent {
            (SyntaxErrorKind::UnexpectedIndent, "unexpected indent".to_owned())
        } else if let Some(LabelTarget::Symbol(symbol)) = error.expected
            && grammar.symbol_name(symbol) == Some(INDENTED_BLOCK_RULE)
        {
            (
                SyntaxErrorKind::ExpectedIndentedBlock,
                "expected an indented block".to_owned(),
            )
        } else {
            let message = match &error.expected_str {
                Some(expected) => format!("invalid syntax (expected '{expected}')"),
                None => "invalid syntax".to_owned(),
            };
            (SyntaxErrorKind::InvalidSyntax, message)
        };

        Self {
            repair: error.repair.clone(),
            guessed: error.guessed,
            ..Self::at_token(kind, message, &error.token)
        }
    }

    /// A token the grammar has no label for, such as a stray `$`.
    pub fn from_classify_error(error: &ClassifyError) -> Self {
        Self::at_token(
            SyntaxErrorKind::InvalidSyntax,
            "invalid syntax".to_owned(),
            &error.token,
        )
    }

    pub fn from_lex_error(error: &LexError) -> Self {
        let kind = match error.kind {
            LexErrorKind::Token => SyntaxErrorKind::Lexical,
            LexErrorKind::Indentation => SyntaxErrorKind::Indentation,
        };
        Self {
            kind,
            message: error.message.clone(),
            line: error.line,
            offset: error.column,
            text: error.source_line.clone(),
            guessed: false,
            repair: Vec::new(),
        }
    }

    fn at_token(kind: SyntaxErrorKind, message: String, token: &Token) -> Self {
        Self {
            kind,
            message,
            line: token.line,
            offset: token.column + 1,
            text: token.source_line.clone(),
            guessed: false,
            repair: Vec::new(),
        }
    }

    /// The source line, a caret under the offending byte, and the message.
    pub fn format_single(&self) -> String {
        let mut out = String::with_capacity(self.text.len() * 2 + self.message.len() + 16);
        out.push_str(&self.text);
        out.extend(std::iter::repeat_n(' ', self.offset.saturating_sub(1) as usize));
        out.push('^');
        out.push('\n');
        out.push_str(&self.to_string());
        out
    }
}

impl fmt::Display for SyntaxDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.message, self.line)
    }
}

impl Serialize for SyntaxDiagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repair: Vec<String> = self.repair.iter().map(ToString::to_string).collect();
        let mut s = serializer.serialize_struct("SyntaxDiagnostic", 7)?;
        s.serialize_field("kind", &self.kind)?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("line", &self.line)?;
        s.serialize_field("offset", &self.offset)?;
        s.serialize_field("text", self.text.trim_end_matches(['\r', '\n']))?;
        s.serialize_field("guessed", &self.guessed)?;
        s.serialize_field("repair", &repair)?;
        s.end()
    }
}

/// Syntax errors of one source, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    messages: Vec<SyntaxDiagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: SyntaxDiagnostic) {
        self.messages.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn first(&self) -> Option<&SyntaxDiagnostic> {
        self.messages.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyntaxDiagnostic> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[SyntaxDiagnostic] {
        &self.messages
    }

    pub fn into_vec(self) -> Vec<SyntaxDiagnostic> {
        self.messages
    }

    /// Lines of every error, in order.
    pub fn lines(&self) -> Vec<u32> {
        self.messages.iter().map(|d| d.line).collect()
    }

    /// Plain caret listing of every error.
    ///
    /// A single error is formatted on its own. With several, the errors
    /// after the first are introduced by [`GUESSES_HEADER`], every entry is
    /// separated by a blank line and the text ends with a newline.
    pub fn format_messages(&self) -> String {
        if let [single] = self.messages.as_slice() {
            return single.format_single();
        }

        let mut parts = Vec::with_capacity(self.messages.len() + 1);
        for (i, diagnostic) in self.messages.iter().enumerate() {
            if i == 1 {
                parts.push(GUESSES_HEADER.to_owned());
            }
            parts.push(diagnostic.format_single());
        }
        if parts.is_empty() {
            return String::new();
        }
        let mut out = parts.join("\n\n");
        out.push('\n');
        out
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.messages.first() else {
            return f.write_str("no syntax errors");
        };
        write!(f, "{first}")?;
        match self.messages.len() {
            1 => Ok(()),
            2 => write!(f, " (and 1 more error)"),
            n => write!(f, " (and {} more errors)", n - 1),
        }
    }
}

impl FromIterator<SyntaxDiagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = SyntaxDiagnostic>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a SyntaxDiagnostic;
    type IntoIter = std::slice::Iter<'a, SyntaxDiagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = SyntaxDiagnostic;
    type IntoIter = std::vec::IntoIter<SyntaxDiagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
