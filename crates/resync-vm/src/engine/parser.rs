//! Table-driven push-down parser.
//!
//! Each frame on the stack runs the DFA of one rule. For every token the
//! parser looks at the arcs of the top frame's current state and picks one
//! [`Action`]; reduces and pops don't consume the token, so it keeps
//! resolving actions until the token is shifted or rejected.

use resync_core::{DfaState, Grammar, LabelId, LabelTarget, StateId, SymbolId, Token};

use super::error::{Error, ParseError, ParseErrors, Result};
use super::frame::{FrameArena, FrameId};
use super::node::Node;
use super::recovery::{self, ExhaustionPolicy, RecoveryLimits};
use super::trace::{NoopTracer, Tracer};

/// What to do with a token in a given DFA state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume the token and move to this state.
    Shift(StateId),
    /// Move to `next`, then descend into rule `sub`.
    Reduce { next: StateId, sub: SymbolId },
    /// The rule is complete; hand its node to the parent.
    Pop,
    Error,
}

/// Pick the action for a token with label `label` in `state`.
///
/// Arcs are tried in table order. The grammar compiler rejects grammars in
/// which two arcs of one state can start with the same token, so at most one
/// arc can match.
pub fn find_action(grammar: &Grammar, state: &DfaState, label: LabelId) -> Action {
    for arc in &state.arcs {
        if arc.label == label {
            return Action::Shift(arc.target);
        }
        if let LabelTarget::Symbol(sub) = grammar.label(arc.label)
            && grammar.dfa(sub).first.contains(label)
        {
            return Action::Reduce {
                next: arc.target,
                sub,
            };
        }
    }
    if state.accepting {
        Action::Pop
    } else {
        Action::Error
    }
}

/// Outcome of feeding one token.
pub(crate) enum Advance {
    /// The token was consumed; parsing goes on with this stack.
    Continue(FrameId),
    /// The start rule is complete.
    Accepted(Node),
}

/// Feed one classified token to the stack `top`.
///
/// The token is not consumed when the start rule completes on a pop, since
/// the token then lies past the end of the tree.
pub(crate) fn add_token<T: Tracer>(
    grammar: &Grammar,
    arena: &mut FrameArena,
    mut top: FrameId,
    token: &Token,
    label: LabelId,
    tracer: &mut T,
) -> std::result::Result<Advance, ParseError> {
    loop {
        let (symbol, state_id) = {
            let frame = arena.get(top);
            (frame.symbol, frame.state)
        };
        let state = &grammar.dfa(symbol).states[state_id as usize];

        match find_action(grammar, state, label) {
            Action::Shift(next) => {
                tracer.trace_shift(symbol, next, token);
                let shifted = arena.with_child(top, Node::terminal(token));
                let shifted = arena.with_state(shifted, next);
                return Ok(shift_pop(grammar, arena, shifted, tracer));
            }
            Action::Reduce { next, sub } => {
                tracer.trace_reduce(symbol, sub);
                let moved = arena.with_state(top, next);
                top = arena.push(Some(moved), sub);
            }
            Action::Pop => {
                tracer.trace_pop(symbol);
                match pop(arena, top) {
                    Advance::Continue(parent) => top = parent,
                    accepted => return Ok(accepted),
                }
            }
            Action::Error => {
                let error = ParseError::rejected(grammar, state, token);
                tracer.trace_error(&error);
                return Err(error);
            }
        }
    }
}

/// After a shift, pop every frame whose only remaining move is to finish.
fn shift_pop<T: Tracer>(
    grammar: &Grammar,
    arena: &mut FrameArena,
    mut top: FrameId,
    tracer: &mut T,
) -> Advance {
    loop {
        let frame = arena.get(top);
        let symbol = frame.symbol;
        let state = &grammar.dfa(symbol).states[frame.state as usize];
        if !state.accepting || !state.arcs.is_empty() {
            return Advance::Continue(top);
        }
        tracer.trace_pop(symbol);
        match pop(arena, top) {
            Advance::Continue(parent) => top = parent,
            accepted => return accepted,
        }
    }
}

fn pop(arena: &mut FrameArena, top: FrameId) -> Advance {
    let (node, parent) = {
        let frame = arena.get(top);
        (frame.to_node(), frame.parent)
    };
    match parent {
        Some(parent) => Advance::Continue(arena.with_child(parent, node)),
        None => Advance::Accepted(node),
    }
}

/// Parser for one grammar and start rule.
#[derive(Clone, Debug)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
    start: SymbolId,
    limits: RecoveryLimits,
    recovery: bool,
}

/// Builder for [`Parser`] instances.
pub struct ParserBuilder<'g> {
    grammar: &'g Grammar,
    start: SymbolId,
    limits: RecoveryLimits,
    recovery: bool,
}

impl<'g> ParserBuilder<'g> {
    /// Create a builder starting at the grammar's start rule, with recovery on.
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            start: grammar.start(),
            limits: RecoveryLimits::default(),
            recovery: true,
        }
    }

    /// Set the rule the token stream must match. A symbol that is not a rule
    /// of the grammar makes every parse fail with
    /// [`Error::UnknownStartRule`].
    pub fn start(mut self, symbol: SymbolId) -> Self {
        self.start = symbol;
        self
    }

    /// Set the repair search limits.
    pub fn limits(mut self, limits: RecoveryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Turn error recovery on or off. Without it the first error is final.
    pub fn recovery(mut self, enabled: bool) -> Self {
        self.recovery = enabled;
        self
    }

    pub fn build(self) -> Parser<'g> {
        Parser {
            grammar: self.grammar,
            start: self.start,
            limits: self.limits,
            recovery: self.recovery,
        }
    }
}

impl<'g> Parser<'g> {
    /// Parser for the grammar's start rule with default limits.
    pub fn new(grammar: &'g Grammar) -> Self {
        ParserBuilder::new(grammar).build()
    }

    pub fn builder(grammar: &'g Grammar) -> ParserBuilder<'g> {
        ParserBuilder::new(grammar)
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Parse a token stream, returning the tree of the start rule.
    ///
    /// This is a convenience method that uses `NoopTracer`, which gets
    /// completely optimized away at compile time.
    pub fn parse(&self, tokens: &[Token]) -> Result<Node> {
        self.parse_with(tokens, &mut NoopTracer)
    }

    /// Parse with a tracer for debugging.
    ///
    /// Every rejected token is recorded. With recovery on, the parser then
    /// resumes wherever the repair search says and keeps looking for further
    /// errors; all of them are returned together once the input is used up.
    pub fn parse_with<T: Tracer>(&self, tokens: &[Token], tracer: &mut T) -> Result<Node> {
        let grammar = self.grammar;
        if !grammar.is_rule(self.start) {
            return Err(Error::UnknownStartRule(self.start));
        }
        let mut arena = FrameArena::new();
        let mut top = arena.push(None, self.start);
        let mut errors: Vec<ParseError> = Vec::new();
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];
            let label = grammar.classify(token)?;

            match add_token(grammar, &mut arena, top, token, label, tracer) {
                Ok(Advance::Continue(next)) => {
                    top = next;
                    index += 1;
                }
                Ok(Advance::Accepted(node)) => {
                    return match ParseErrors::new(errors) {
                        Some(errors) => Err(Error::Syntax(errors)),
                        None => Ok(node),
                    };
                }
                Err(mut error) => {
                    error.guessed = !errors.is_empty();
                    if !self.recovery {
                        errors.push(error);
                        break;
                    }

                    let found = recovery::recover(
                        grammar,
                        &mut arena,
                        top,
                        tokens,
                        index,
                        &self.limits,
                        tracer,
                    );
                    match found {
                        Ok(repair) => {
                            top = repair.stack;
                            index = repair.index;
                            error.repair = repair.edits;
                            errors.push(error);
                        }
                        Err(attempts) => {
                            errors.push(error);
                            let errors = ParseErrors(errors);
                            return Err(match self.limits.policy {
                                ExhaustionPolicy::KeepErrors => Error::Syntax(errors),
                                ExhaustionPolicy::Fail => {
                                    Error::RecoveryExhausted { attempts, errors }
                                }
                            });
                        }
                    }
                }
            }
        }

        match ParseErrors::new(errors) {
            Some(errors) => Err(Error::Syntax(errors)),
            None => Err(Error::UnexpectedEnd),
        }
    }
}
