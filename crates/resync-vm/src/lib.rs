//! Push-down parser and repair search for compiled resync grammars.
//!
//! The parser walks one DFA per grammar rule, keeping its stack in an
//! append-only frame arena so that the repair search can branch from any
//! point without copying. When a token is rejected, the recovery engine looks
//! for a short sequence of token edits that lets parsing go on, so a single
//! pass can report several syntax errors.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Action, Edit, EditKind, Error, ExhaustionPolicy, Frame, FrameArena, FrameId, Node, NodeView,
    NoopTracer, ParseError, ParseErrors, Parser, ParserBuilder, PrintTracer, RecoveryLimits,
    Repair, Result, Terminal, Terminals, Tracer, Verbosity, find_action,
};
