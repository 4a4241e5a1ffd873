//! Resync: a Python 2.7 parser that reports several syntax errors per pass.
//!
//! After the first syntax error, a repair search edits the tokens around it
//! until parsing can continue, so later errors are found too. Those later
//! errors are marked as guesses.
//!
//! # Example
//!
//! ```
//! use resync_lib::{Error, ParseOptions, parse_source};
//!
//! let source = "if a\n    print 2\n\nx +=\n";
//! let Err(Error::Syntax(diagnostics)) = parse_source(source, &ParseOptions::default()) else {
//!     panic!("expected syntax errors");
//! };
//! assert_eq!(diagnostics.lines(), [1, 4]);
//! eprintln!("{}", diagnostics.format_messages());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod grammar;
pub mod parse;

use resync_compiler::LexError;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, SyntaxDiagnostic, SyntaxErrorKind};
pub use grammar::{Mode, python_grammar, python_grammar_no_print};
pub use parse::{
    ParseOptions, ParsedSource, parse_source, parse_source_with, parse_tokens_with,
    tokenize_source,
};

/// Errors of [`parse_source`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The tokenizer rejected the source; nothing was parsed.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The parser found syntax errors.
    #[error("{0}")]
    Syntax(Diagnostics),

    /// The repair search gave up and the exhaustion policy asked to fail.
    #[error("no recovery found after {attempts} attempts: {diagnostics}")]
    RecoveryExhausted {
        attempts: usize,
        diagnostics: Diagnostics,
    },

    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// The grammar has no start rule for the requested mode.
    #[error("grammar has no `{}` rule", .0.start_rule())]
    NoStartRule(Mode),
}

impl Error {
    /// Every error as a diagnostic, lexical errors included.
    pub fn diagnostics(&self) -> Diagnostics {
        match self {
            Error::Lex(error) => [SyntaxDiagnostic::from_lex_error(error)]
                .into_iter()
                .collect(),
            Error::Syntax(diagnostics) | Error::RecoveryExhausted { diagnostics, .. } => {
                diagnostics.clone()
            }
            Error::UnexpectedEnd | Error::NoStartRule(_) => Diagnostics::new(),
        }
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;
