//! Grammar compiler.
//!
//! Turns an EBNF-like grammar source into [`Grammar`] tables in four passes:
//!
//! 1. `meta` reads the rules and builds one Thompson NFA per rule;
//! 2. `dfa` converts each NFA by subset construction and merges
//!    equivalent states;
//! 3. `first` computes FIRST sets, rejecting left recursion and
//!    ambiguous start states;
//! 4. `tables` assigns labels and symbol ids and lays out the tables.

mod dfa;
mod first;
mod meta;
mod nfa;
mod tables;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod dfa_tests;

use resync_core::{Grammar, GrammarConfig, TokenKind};

use crate::lexer::LexError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected token {expected} but got {found} at line {line}")]
    Expected {
        expected: TokenKind,
        found: TokenKind,
        line: u32,
    },

    #[error("unexpected token: {kind} at line {line}")]
    UnexpectedToken { kind: TokenKind, line: u32 },

    #[error("no such rule: {0}")]
    NoSuchRule(String),

    #[error("no such operator: {0}")]
    NoSuchOperator(String),

    #[error("no such token: {0}")]
    NoSuchToken(String),

    #[error("recursion in rule: '{0}'")]
    LeftRecursion(String),

    #[error("ambiguous symbol with label {label} in rule '{rule}'")]
    Ambiguous { rule: String, label: String },

    #[error("rule '{0}' is defined more than once")]
    DuplicateRule(String),

    #[error("grammar has no rules")]
    Empty,

    #[error("grammar needs more than 256 labels")]
    TooManyLabels,
}

pub type GrammarResult<T> = Result<T, GrammarError>;

/// Compile a grammar source.
///
/// The first rule is the start symbol. `config` decides how quoted literals
/// map to token kinds and is kept by the resulting grammar for use by the
/// parser and the repair search.
pub fn compile(source: &str, config: GrammarConfig) -> GrammarResult<Grammar> {
    let parsed = meta::parse(source)?;
    let firsts = first::first_sets(&parsed)?;
    let tables = tables::build(&parsed, &firsts, &config)?;
    Ok(Grammar::new(tables, config))
}
