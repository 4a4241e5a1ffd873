//! Front half of resync: the tokenizer and the grammar compiler.
//!
//! - `lexer` - Python-style tokenizer with indentation tracking
//! - `compile` - grammar source to parser tables

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod lexer;

pub use compile::{GrammarError, GrammarResult, compile};
pub use lexer::{LexError, LexErrorKind, LexOptions, split_lines, tokenize, tokenize_lines};
