//! Thompson NFA for one grammar rule.
//!
//! States live in an arena and are addressed by index. Arcs carry an
//! interned raw label (the grammar text of a terminal or rule reference) or
//! nothing for an epsilon move.

use std::collections::BTreeSet;

/// Index into the meta-parser's label interner.
pub(crate) type RawLabel = usize;

pub(crate) type NfaStateId = usize;

#[derive(Debug, Default)]
pub(crate) struct Nfa {
    states: Vec<Vec<(Option<RawLabel>, NfaStateId)>>,
}

impl Nfa {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_state(&mut self) -> NfaStateId {
        self.states.push(Vec::new());
        self.states.len() - 1
    }

    pub(crate) fn arc(&mut self, from: NfaStateId, to: NfaStateId, label: RawLabel) {
        self.states[from].push((Some(label), to));
    }

    pub(crate) fn epsilon(&mut self, from: NfaStateId, to: NfaStateId) {
        self.states[from].push((None, to));
    }

    pub(crate) fn arcs(&self, state: NfaStateId) -> &[(Option<RawLabel>, NfaStateId)] {
        &self.states[state]
    }

    /// Add `state` and everything reachable from it by epsilon moves.
    pub(crate) fn closure_into(&self, state: NfaStateId, into: &mut BTreeSet<NfaStateId>) {
        let mut stack = vec![state];
        while let Some(state) = stack.pop() {
            if !into.insert(state) {
                continue;
            }
            for &(label, target) in &self.states[state] {
                if label.is_none() {
                    stack.push(target);
                }
            }
        }
    }
}
