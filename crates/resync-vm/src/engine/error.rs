//! Errors reported by the parser and the repair search.

use std::fmt;

use resync_core::{ClassifyError, DfaState, Grammar, LabelTarget, SymbolId, Token};

use super::recovery::Edit;

/// One rejected token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bad input: {} at line {}", .token, .token.line)]
pub struct ParseError {
    pub token: Token,
    /// What the rejecting state would have accepted, if it had a single arc.
    pub expected: Option<LabelTarget>,
    /// Literal text of that single arc, when it has one.
    pub expected_str: Option<String>,
    /// Found after an earlier error was repaired, so it may be an artifact
    /// of that repair.
    pub guessed: bool,
    /// Edits that let parsing continue past this error. Empty when recovery
    /// was off or gave up.
    pub repair: Vec<Edit>,
}

impl ParseError {
    pub(crate) fn rejected(grammar: &Grammar, state: &DfaState, token: &Token) -> Self {
        let (expected, expected_str) = match state.arcs.as_slice() {
            [arc] => (
                Some(grammar.label(arc.label)),
                grammar.expected_str(arc.label).map(str::to_owned),
            ),
            _ => (None, None),
        };
        Self {
            token: token.clone(),
            expected,
            expected_str,
            guessed: false,
            repair: Vec::new(),
        }
    }

    pub fn line(&self) -> u32 {
        self.token.line
    }

    pub fn column(&self) -> u32 {
        self.token.column
    }
}

/// Syntax errors of one parse, in input order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub(crate) Vec<ParseError>);

impl ParseErrors {
    pub(crate) fn new(errors: Vec<ParseError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// The error found without any repair.
    pub fn first(&self) -> &ParseError {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ParseError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.0
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        match self.len() {
            1 => Ok(()),
            2 => f.write_str(" (and 1 more error)"),
            n => write!(f, " (and {} more errors)", n - 1),
        }
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors that can occur while parsing a token stream.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A token has no label in the grammar; the lexer and grammar disagree.
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// The input has syntax errors.
    #[error("{0}")]
    Syntax(ParseErrors),

    /// The repair search hit its attempt cap.
    #[error("no recovery found after {attempts} attempts: {errors}")]
    RecoveryExhausted { attempts: usize, errors: ParseErrors },

    /// The token stream ended before the start rule was complete.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// The parser was asked to start at a symbol that is not a rule.
    #[error("start symbol {0} is not a rule of the grammar")]
    UnknownStartRule(SymbolId),
}

impl Error {
    /// Syntax errors carried by this error, if any.
    pub fn parse_errors(&self) -> Option<&ParseErrors> {
        match self {
            Error::Syntax(errors) | Error::RecoveryExhausted { errors, .. } => Some(errors),
            Error::Classify(_) | Error::UnexpectedEnd | Error::UnknownStartRule(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
