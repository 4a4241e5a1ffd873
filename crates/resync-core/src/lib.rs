//! Core data structures shared by the resync lexer, grammar compiler and parser.
//!
//! - `token` - token kinds and the `Token` record produced by the lexer
//! - `automaton` - table-driven byte automata with greedy and non-greedy matching
//! - `grammar` - compiled parser tables (labels, per-rule DFAs, FIRST bitmaps)

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod automaton;
pub mod grammar;
pub mod token;

#[cfg(test)]
mod automaton_tests;
#[cfg(test)]
mod token_tests;

pub use automaton::{Automaton, AutomatonError, ERROR_STATE, MatchMode, StateArcs};
pub use grammar::{
    ClassifyError, DfaState, FIRST_SYMBOL_ID, FirstSet, Grammar, GrammarConfig, GrammarTables,
    GrammarVariant, LabelId, LabelTarget, ParserDfa, StateId, SymbolId, Transition,
};
pub use token::{Token, TokenKind};
