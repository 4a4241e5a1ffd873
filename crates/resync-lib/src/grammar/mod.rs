//! The bundled Python 2.7 grammar.
//!
//! Both grammars are compiled once, on first use. The print-function
//! grammar is a variant of the default one that treats `print` as a plain
//! name, so it shares every table except the keyword table.

#[cfg(test)]
mod grammar_tests;

use std::sync::LazyLock;

use resync_compiler::compile;
use resync_core::{Grammar, GrammarConfig, SymbolId, TokenKind};

/// Source of the bundled grammar.
pub const PYTHON_GRAMMAR: &str = include_str!("../../grammars/python2.7.gram");

/// Rule that stands for a real or a recovery-inserted indented block.
pub const INDENTED_BLOCK_RULE: &str = "realorfakesuite";

static PYTHON: LazyLock<Grammar> = LazyLock::new(|| {
    compile(PYTHON_GRAMMAR, python_config()).expect("bundled grammar compiles")
});

static PYTHON_NO_PRINT: LazyLock<Grammar> =
    LazyLock::new(|| PYTHON.variant().without_keyword("print").build());

/// Token handling for Python sources.
///
/// The repair search never invents block structure (INDENT, DEDENT), and
/// never drops it or a NEWLINE.
pub fn python_config() -> GrammarConfig {
    GrammarConfig::new(TokenKind::Name)
        .with_standard_operators()
        .never_insert([TokenKind::EndMarker, TokenKind::Indent, TokenKind::Dedent])
        .never_delete([
            TokenKind::EndMarker,
            TokenKind::Indent,
            TokenKind::Dedent,
            TokenKind::Newline,
        ])
}

/// The Python 2.7 grammar, with `print` as a statement keyword.
pub fn python_grammar() -> &'static Grammar {
    &PYTHON
}

/// The Python 2.7 grammar as seen after `from __future__ import print_function`.
pub fn python_grammar_no_print() -> &'static Grammar {
    &PYTHON_NO_PRINT
}

/// Pick the grammar for a source, depending on whether `print` is a function.
pub fn grammar_for(print_function: bool) -> &'static Grammar {
    if print_function {
        python_grammar_no_print()
    } else {
        python_grammar()
    }
}

/// Parse modes, named after the arguments of Python's `compile()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// A module: any number of statements.
    #[default]
    Exec,
    /// A single expression list.
    Eval,
    /// One interactive statement.
    Single,
}

impl Mode {
    /// Name of the start rule for this mode.
    pub fn start_rule(self) -> &'static str {
        match self {
            Mode::Exec => "file_input",
            Mode::Eval => "eval_input",
            Mode::Single => "single_input",
        }
    }

    /// Start symbol for this mode in `grammar`.
    pub fn start_symbol(self, grammar: &Grammar) -> Option<SymbolId> {
        grammar.symbol_id(self.start_rule())
    }

    pub fn from_name(name: &str) -> Option<Mode> {
        match name {
            "exec" => Some(Mode::Exec),
            "eval" => Some(Mode::Eval),
            "single" => Some(Mode::Single),
            _ => None,
        }
    }
}
