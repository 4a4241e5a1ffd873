//! Breadth-first repair search.
//!
//! When a token is rejected, the search edits the token stream at the
//! failing position until the parser can get through a window of the tokens
//! that follow. Each repair is a sequence of edits:
//!
//! - consume: feed the next real token as-is (only after another edit);
//! - delete: skip the next real token, unless its kind is protected;
//! - insert: feed a synthetic token that the current state accepts.
//!
//! Every edit kind has its own budget. An insert may not be followed by a
//! delete or by another insert. Candidates are expanded one edit at a time,
//! level by level; within a level they are tried in the order they were
//! generated (consume, then delete, then inserts in label order). The first
//! candidate whose trial parse gets through the window wins.
//!
//! Candidates that reach an already seen (position, stack shape) pair are
//! dropped, since they would only repeat earlier work.

use std::collections::HashSet;
use std::fmt;

use resync_core::{Grammar, StateId, SymbolId, Token};

use super::frame::{FrameArena, FrameId};
use super::parser::{Advance, add_token};
use super::trace::{NoopTracer, Tracer};

/// What to do when the attempt cap is hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Stop parsing and report the errors found so far as syntax errors.
    #[default]
    KeepErrors,
    /// Report a distinct exhaustion error.
    Fail,
}

/// Budgets of the repair search.
#[derive(Clone, Copy, Debug)]
pub struct RecoveryLimits {
    /// Tokens past the end of the failing line a trial parse must get
    /// through (default: 5).
    pub(crate) window: usize,
    /// Maximum consume edits per repair (default: 6).
    pub(crate) consumes: usize,
    /// Maximum insert edits per repair (default: 4).
    pub(crate) inserts: usize,
    /// Maximum delete edits per repair (default: 3).
    pub(crate) deletes: usize,
    /// Maximum candidates tried per search (default: 100,000).
    pub(crate) attempts: usize,
    pub(crate) policy: ExhaustionPolicy,
}

impl Default for RecoveryLimits {
    fn default() -> Self {
        Self {
            window: 5,
            consumes: 6,
            inserts: 4,
            deletes: 3,
            attempts: 100_000,
            policy: ExhaustionPolicy::default(),
        }
    }
}

impl RecoveryLimits {
    /// Create new limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trial window size.
    pub fn window(mut self, tokens: usize) -> Self {
        self.window = tokens;
        self
    }

    /// Set the consume budget.
    pub fn consumes(mut self, max: usize) -> Self {
        self.consumes = max;
        self
    }

    /// Set the insert budget.
    pub fn inserts(mut self, max: usize) -> Self {
        self.inserts = max;
        self
    }

    /// Set the delete budget.
    pub fn deletes(mut self, max: usize) -> Self {
        self.deletes = max;
        self
    }

    /// Set the attempt cap.
    pub fn attempts(mut self, max: usize) -> Self {
        self.attempts = max;
        self
    }

    /// Set the exhaustion policy.
    pub fn policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn get_window(&self) -> usize {
        self.window
    }
    pub fn get_consumes(&self) -> usize {
        self.consumes
    }
    pub fn get_inserts(&self) -> usize {
        self.inserts
    }
    pub fn get_deletes(&self) -> usize {
        self.deletes
    }
    pub fn get_attempts(&self) -> usize {
        self.attempts
    }
    pub fn get_policy(&self) -> ExhaustionPolicy {
        self.policy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    Consume,
    Delete,
    Insert,
}

impl EditKind {
    /// One-letter code used in repair summaries.
    pub fn code(self) -> char {
        match self {
            EditKind::Consume => 'e',
            EditKind::Delete => 'd',
            EditKind::Insert => 'i',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EditKind::Consume => "consume",
            EditKind::Delete => "delete",
            EditKind::Insert => "insert",
        }
    }
}

/// One step of a repair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub kind: EditKind,
    /// The real token consumed or deleted, or the synthetic token inserted.
    pub token: Token,
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.name(), self.token)
    }
}

/// A candidate repair: the edits so far, and where they leave the parser.
#[derive(Clone, Debug)]
pub struct Repair {
    pub(crate) stack: FrameId,
    /// Next real token to feed.
    pub(crate) index: usize,
    pub(crate) edits: Vec<Edit>,
}

impl Repair {
    fn new(stack: FrameId, index: usize) -> Self {
        Self {
            stack,
            index,
            edits: Vec::new(),
        }
    }

    pub fn stack(&self) -> FrameId {
        self.stack
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn count(&self, kind: EditKind) -> usize {
        self.edits.iter().filter(|e| e.kind == kind).count()
    }

    pub fn last_kind(&self) -> Option<EditKind> {
        self.edits.last().map(|e| e.kind)
    }

    /// Edit codes in order, such as `"ie"` for an insert followed by a consume.
    pub fn summary(&self) -> String {
        self.edits.iter().map(|e| e.kind.code()).collect()
    }

    fn extend(&self, stack: FrameId, index: usize, kind: EditKind, token: &Token) -> Self {
        let mut edits = self.edits.clone();
        edits.push(Edit {
            kind,
            token: token.clone(),
        });
        Self {
            stack,
            index,
            edits,
        }
    }

    /// Every repair one edit longer than this one, in trial order.
    fn further_changes(
        &self,
        grammar: &Grammar,
        arena: &mut FrameArena,
        tokens: &[Token],
        candidates: &[Token],
        limits: &RecoveryLimits,
    ) -> Vec<Repair> {
        let mut out = Vec::new();
        let after_insert = self.last_kind() == Some(EditKind::Insert);

        if let Some(token) = tokens.get(self.index) {
            if !self.edits.is_empty()
                && self.count(EditKind::Consume) < limits.consumes
                && let Some(stack) = feed(grammar, arena, self.stack, token)
            {
                out.push(self.extend(stack, self.index + 1, EditKind::Consume, token));
            }

            if self.count(EditKind::Delete) < limits.deletes
                && !after_insert
                && grammar.config().can_delete(token.kind)
            {
                out.push(self.extend(self.stack, self.index + 1, EditKind::Delete, token));
            }
        }

        if self.count(EditKind::Insert) < limits.inserts && !after_insert {
            for candidate in candidates {
                if let Some(stack) = feed(grammar, arena, self.stack, candidate) {
                    out.push(self.extend(stack, self.index, EditKind::Insert, candidate));
                }
            }
        }
        out
    }

    /// Whether the parser gets from this repair through `tokens[..end]`
    /// without an error.
    fn parses_successfully(
        &self,
        grammar: &Grammar,
        arena: &mut FrameArena,
        tokens: &[Token],
        end: usize,
    ) -> bool {
        let mut stack = self.stack;
        for token in tokens.get(self.index..end).unwrap_or_default() {
            let Ok(label) = grammar.classify(token) else {
                return false;
            };
            match add_token(grammar, arena, stack, token, label, &mut NoopTracer) {
                Ok(Advance::Continue(next)) => stack = next,
                Ok(Advance::Accepted(_)) => return true,
                Err(_) => return false,
            }
        }
        true
    }

    fn key(&self, arena: &FrameArena) -> (usize, Vec<(SymbolId, StateId)>) {
        (self.index, arena.shape(self.stack))
    }
}

/// Feed one token and keep the resulting stack only if parsing can go on.
fn feed(
    grammar: &Grammar,
    arena: &mut FrameArena,
    stack: FrameId,
    token: &Token,
) -> Option<FrameId> {
    let mark = arena.len();
    let label = grammar.classify(token).ok()?;
    match add_token(grammar, arena, stack, token, label, &mut NoopTracer) {
        Ok(Advance::Continue(next)) => Some(next),
        Ok(Advance::Accepted(_)) | Err(_) => {
            arena.truncate(mark);
            None
        }
    }
}

/// End of the trial window: the first token past the failing line, plus
/// `window` more tokens.
pub(super) fn window_end(tokens: &[Token], index: usize, window: usize) -> usize {
    let line = tokens[index].line;
    let end = tokens[index..]
        .iter()
        .position(|t| t.line > line)
        .map_or(tokens.len() - 1, |offset| index + offset);
    (end + window).min(tokens.len())
}

/// Search for a repair of the stack `stack` rejecting `tokens[index]`.
///
/// On success the returned repair's stack is valid in `arena`; every other
/// frame pushed by the search is dropped. On failure the number of attempts
/// made is returned.
pub(crate) fn recover<T: Tracer>(
    grammar: &Grammar,
    arena: &mut FrameArena,
    stack: FrameId,
    tokens: &[Token],
    index: usize,
    limits: &RecoveryLimits,
    tracer: &mut T,
) -> Result<Repair, usize> {
    tracer.trace_recovery_start(index, &tokens[index]);
    let mark = arena.len();
    let end = window_end(tokens, index, limits.window);
    let candidates = grammar.insertion_candidates();

    let mut queue = vec![Repair::new(stack, index)];
    let mut seen = HashSet::new();
    let mut attempts = 0;

    while !queue.is_empty() {
        let mut next_queue = Vec::new();
        for element in &queue {
            for repair in element.further_changes(grammar, arena, tokens, &candidates, limits) {
                if !seen.insert(repair.key(arena)) {
                    continue;
                }
                attempts += 1;
                if attempts > limits.attempts {
                    tracer.trace_exhausted(limits.attempts);
                    arena.truncate(mark);
                    return Err(limits.attempts);
                }

                let trial = arena.len();
                let accepted = repair.parses_successfully(grammar, arena, tokens, end);
                arena.truncate(trial);
                tracer.trace_candidate(&repair, accepted);

                if accepted {
                    tracer.trace_repair_accepted(&repair, attempts);
                    let stack = arena.keep(mark, repair.stack);
                    return Ok(Repair { stack, ..repair });
                }
                next_queue.push(repair);
            }
        }
        queue = next_queue;
    }

    tracer.trace_exhausted(attempts);
    arena.truncate(mark);
    Err(attempts)
}
