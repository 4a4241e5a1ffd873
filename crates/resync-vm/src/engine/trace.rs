//! Tracing infrastructure for debugging parses and repairs.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The parser is generic over its tracer. When `NoopTracer` is used:
//! - All trait methods are `#[inline(always)]` empty functions
//! - The compiler eliminates all tracer calls and their arguments
//! - No tracing-related state exists in the parser or the repair search
//!
//! Trial parses run by the repair search are never traced; only the
//! candidates and the outcome of the search are.

use resync_core::{Grammar, StateId, SymbolId, Token};

use super::error::ParseError;
use super::recovery::Repair;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: errors and the outcome of each repair search.
    #[default]
    Default,
    /// Verbose (-v): also every repair candidate tried.
    Verbose,
    /// Very verbose (-vv): also every shift, reduce and pop.
    VeryVerbose,
}

/// Tracer trait for parser instrumentation.
///
/// Methods receive the raw ids the parser already has; name resolution
/// happens in the implementation.
pub trait Tracer {
    /// Called when a token is shifted in `symbol`, moving to state `next`.
    fn trace_shift(&mut self, symbol: SymbolId, next: StateId, token: &Token);

    /// Called when `symbol` descends into `sub`.
    fn trace_reduce(&mut self, symbol: SymbolId, sub: SymbolId);

    /// Called when `symbol` is complete and its node is handed to the parent.
    fn trace_pop(&mut self, symbol: SymbolId);

    /// Called when a token is rejected.
    fn trace_error(&mut self, error: &ParseError);

    /// Called before searching for a repair at token `index`.
    fn trace_recovery_start(&mut self, index: usize, token: &Token);

    /// Called after a candidate's trial parse.
    fn trace_candidate(&mut self, repair: &Repair, accepted: bool);

    /// Called when the search settles on a repair.
    fn trace_repair_accepted(&mut self, repair: &Repair, attempts: usize);

    /// Called when the search gives up.
    fn trace_exhausted(&mut self, attempts: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_shift(&mut self, _symbol: SymbolId, _next: StateId, _token: &Token) {}

    #[inline(always)]
    fn trace_reduce(&mut self, _symbol: SymbolId, _sub: SymbolId) {}

    #[inline(always)]
    fn trace_pop(&mut self, _symbol: SymbolId) {}

    #[inline(always)]
    fn trace_error(&mut self, _error: &ParseError) {}

    #[inline(always)]
    fn trace_recovery_start(&mut self, _index: usize, _token: &Token) {}

    #[inline(always)]
    fn trace_candidate(&mut self, _repair: &Repair, _accepted: bool) {}

    #[inline(always)]
    fn trace_repair_accepted(&mut self, _repair: &Repair, _attempts: usize) {}

    #[inline(always)]
    fn trace_exhausted(&mut self, _attempts: usize) {}
}

/// Tracer that collects human-readable lines.
pub struct PrintTracer<'g> {
    grammar: &'g Grammar,
    verbosity: Verbosity,
    lines: Vec<String>,
}

impl<'g> PrintTracer<'g> {
    pub fn new(grammar: &'g Grammar, verbosity: Verbosity) -> Self {
        Self {
            grammar,
            verbosity,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the collected lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{}", line);
        }
    }

    fn symbol(&self, symbol: SymbolId) -> &'g str {
        self.grammar.symbol_name(symbol).unwrap_or("?")
    }

    fn describe(repair: &Repair) -> String {
        let edits: Vec<_> = repair.edits().iter().map(ToString::to_string).collect();
        format!("{} [{}]", repair.summary(), edits.join(", "))
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_shift(&mut self, symbol: SymbolId, next: StateId, token: &Token) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let line = format!("  shift {token} in {} -> s{next}", self.symbol(symbol));
        self.lines.push(line);
    }

    fn trace_reduce(&mut self, symbol: SymbolId, sub: SymbolId) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let line = format!("  reduce {} -> {}", self.symbol(symbol), self.symbol(sub));
        self.lines.push(line);
    }

    fn trace_pop(&mut self, symbol: SymbolId) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let line = format!("  pop {}", self.symbol(symbol));
        self.lines.push(line);
    }

    fn trace_error(&mut self, error: &ParseError) {
        let mut line = format!(
            "error: {} (line {}, column {})",
            error.token, error.token.line, error.token.column
        );
        if let Some(expected) = &error.expected_str {
            line.push_str(&format!(", expected '{expected}'"));
        }
        self.lines.push(line);
    }

    fn trace_recovery_start(&mut self, index: usize, token: &Token) {
        self.lines.push(format!("recover at token {index}: {token}"));
    }

    fn trace_candidate(&mut self, repair: &Repair, accepted: bool) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let outcome = if accepted { "ok" } else { "fail" };
        self.lines
            .push(format!("  try {} {outcome}", Self::describe(repair)));
    }

    fn trace_repair_accepted(&mut self, repair: &Repair, attempts: usize) {
        self.lines.push(format!(
            "repaired with {} after {attempts} attempts",
            Self::describe(repair)
        ));
    }

    fn trace_exhausted(&mut self, attempts: usize) {
        self.lines
            .push(format!("no repair found after {attempts} attempts"));
    }
}
