//! Source text to parse tree.
//!
//! The pipeline is: split the source into physical lines, tokenize them,
//! look for a `from __future__ import print_function` prologue to pick the
//! grammar, then run the table-driven parser with repair search on the
//! tokens. Parser errors come back as [`Diagnostics`].

mod future;

#[cfg(test)]
mod future_tests;

use resync_compiler::{LexError, LexOptions, split_lines, tokenize_lines};
use resync_core::{Grammar, Token};
use resync_vm::{Node, NoopTracer, Parser, RecoveryLimits, Tracer};

use crate::diagnostics::{Diagnostics, SyntaxDiagnostic};
use crate::grammar::{Mode, grammar_for};
use crate::{Error, Result};

pub use future::{future_features, imports_print_function};

/// Options of [`parse_source`].
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    mode: Mode,
    print_function: bool,
    imply_dedent: bool,
    recovery: bool,
    limits: RecoveryLimits,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Exec,
            print_function: false,
            imply_dedent: true,
            recovery: true,
            limits: RecoveryLimits::default(),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse `print` as a name even without a `__future__` import.
    pub fn print_function(mut self, enabled: bool) -> Self {
        self.print_function = enabled;
        self
    }

    /// Close open blocks at end of input. Sources ending in a newline always
    /// get their blocks closed.
    pub fn imply_dedent(mut self, imply: bool) -> Self {
        self.imply_dedent = imply;
        self
    }

    /// Keep parsing after the first error to find more.
    pub fn recovery(mut self, enabled: bool) -> Self {
        self.recovery = enabled;
        self
    }

    pub fn limits(mut self, limits: RecoveryLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }
    pub fn get_print_function(&self) -> bool {
        self.print_function
    }
    pub fn get_imply_dedent(&self) -> bool {
        self.imply_dedent
    }
    pub fn get_recovery(&self) -> bool {
        self.recovery
    }
    pub fn get_limits(&self) -> RecoveryLimits {
        self.limits
    }

    /// Grammar to parse `tokens` with.
    pub fn grammar_for(&self, tokens: &[Token]) -> &'static Grammar {
        grammar_for(self.print_function || imports_print_function(tokens))
    }
}

/// A successfully parsed source.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub tree: Node,
    /// Grammar the tree was built with. Needed to name its rules.
    pub grammar: &'static Grammar,
}

impl ParsedSource {
    pub fn dump(&self) -> String {
        self.tree.dump(self.grammar)
    }
}

/// Tokenize Python source.
///
/// A missing newline at the end of the last line is added first.
pub fn tokenize_source(
    source: &str,
    options: &ParseOptions,
) -> std::result::Result<Vec<Token>, LexError> {
    let terminated_last: Vec<u8>;
    let mut lines = split_lines(source.as_bytes());
    if let Some(last) = lines.last_mut()
        && !last.ends_with(b"\n")
    {
        terminated_last = [*last, &b"\n"[..]].concat();
        *last = terminated_last.as_slice();
    }

    let imply_dedent = options.imply_dedent || source.ends_with('\n');
    tokenize_lines(lines, LexOptions::new().imply_dedent(imply_dedent))
}

/// Parse Python source.
pub fn parse_source(source: &str, options: &ParseOptions) -> Result<ParsedSource> {
    parse_source_with(source, options, &mut NoopTracer)
}

/// Parse Python source, reporting parser actions and repairs to `tracer`.
pub fn parse_source_with<T: Tracer>(
    source: &str,
    options: &ParseOptions,
    tracer: &mut T,
) -> Result<ParsedSource> {
    let tokens = tokenize_source(source, options)?;
    let grammar = options.grammar_for(&tokens);
    parse_tokens_with(&tokens, grammar, options, tracer)
}

/// Parse already tokenized source with a chosen grammar.
pub fn parse_tokens_with<T: Tracer>(
    tokens: &[Token],
    grammar: &'static Grammar,
    options: &ParseOptions,
    tracer: &mut T,
) -> Result<ParsedSource> {
    let mode = options.mode;
    let start = mode.start_symbol(grammar).ok_or(Error::NoStartRule(mode))?;
    let parser = Parser::builder(grammar)
        .start(start)
        .limits(options.limits)
        .recovery(options.recovery)
        .build();

    match parser.parse_with(tokens, tracer) {
        Ok(tree) => Ok(ParsedSource { tree, grammar }),
        Err(error) => Err(convert_error(error, grammar, mode)),
    }
}

fn convert_error(error: resync_vm::Error, grammar: &Grammar, mode: Mode) -> Error {
    let convert = |errors: &resync_vm::ParseErrors| -> Diagnostics {
        errors
            .iter()
            .map(|e| SyntaxDiagnostic::from_parse_error(e, grammar))
            .collect()
    };

    match error {
        resync_vm::Error::Classify(e) => {
            Error::Syntax(std::iter::once(SyntaxDiagnostic::from_classify_error(&e)).collect())
        }
        resync_vm::Error::Syntax(errors) => Error::Syntax(convert(&errors)),
        resync_vm::Error::RecoveryExhausted { attempts, errors } => Error::RecoveryExhausted {
            attempts,
            diagnostics: convert(&errors),
        },
        resync_vm::Error::UnexpectedEnd => Error::UnexpectedEnd,
        resync_vm::Error::UnknownStartRule(_) => Error::NoStartRule(mode),
    }
}
