//! Parser engine and recovery engine.
//!
//! The parser consumes classified tokens against per-rule DFAs and builds a
//! [`Node`] tree. Each rejected token starts a breadth-first repair search
//! whose result tells the parser where to resume.

mod error;
mod frame;
mod node;
mod parser;
mod recovery;
mod trace;

#[cfg(test)]
mod frame_tests;

pub use error::{Error, ParseError, ParseErrors, Result};
pub use frame::{Frame, FrameArena, FrameId};
pub use node::{Node, NodeView, Terminal, Terminals};
pub use parser::{Action, Parser, ParserBuilder, find_action};
pub use recovery::{Edit, EditKind, ExhaustionPolicy, RecoveryLimits, Repair};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
