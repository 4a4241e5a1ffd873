//! Subset construction and state merging for rule DFAs.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::nfa::{Nfa, NfaStateId, RawLabel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawState {
    /// At most one target per label. Comparison ignores arc order.
    pub(crate) arcs: IndexMap<RawLabel, usize>,
    pub(crate) accepting: bool,
}

/// A rule DFA whose arcs still carry raw (textual) labels.
#[derive(Debug, Clone)]
pub(crate) struct RawDfa {
    pub(crate) states: Vec<RawState>,
}

impl RawDfa {
    /// Subset construction. State 0 is the epsilon closure of `start`; a
    /// state accepts when its NFA set contains `end`.
    ///
    /// NFA states are visited in ascending order and their arcs in insertion
    /// order, so the numbering of DFA states is deterministic.
    pub(crate) fn from_nfa(nfa: &Nfa, start: NfaStateId, end: NfaStateId) -> Self {
        let mut initial = BTreeSet::new();
        nfa.closure_into(start, &mut initial);
        let mut sets = vec![initial];
        let mut states = Vec::new();

        let mut index = 0;
        while index < sets.len() {
            let mut moves: IndexMap<RawLabel, BTreeSet<NfaStateId>> = IndexMap::new();
            for &state in &sets[index] {
                for &(label, target) in nfa.arcs(state) {
                    if let Some(label) = label {
                        nfa.closure_into(target, moves.entry(label).or_default());
                    }
                }
            }

            let accepting = sets[index].contains(&end);
            let mut arcs = IndexMap::with_capacity(moves.len());
            for (label, set) in moves {
                let target = match sets.iter().position(|known| *known == set) {
                    Some(target) => target,
                    None => {
                        sets.push(set);
                        sets.len() - 1
                    }
                };
                arcs.insert(label, target);
            }
            states.push(RawState { arcs, accepting });
            index += 1;
        }

        Self { states }
    }

    /// Merge equivalent states until none are left.
    ///
    /// Two states are equivalent when both accept or both reject and their
    /// arcs map the same labels to the same targets. The later state of a
    /// pair is removed and references to it are redirected to the earlier
    /// one, so state 0 stays the start state.
    pub(crate) fn simplify(&mut self) {
        while let Some((keep, merged)) = self.equivalent_pair() {
            self.states.remove(merged);
            for state in &mut self.states {
                for target in state.arcs.values_mut() {
                    if *target == merged {
                        *target = keep;
                    } else if *target > merged {
                        *target -= 1;
                    }
                }
            }
        }
    }

    fn equivalent_pair(&self) -> Option<(usize, usize)> {
        for (i, state) in self.states.iter().enumerate() {
            for (j, other) in self.states.iter().enumerate().skip(i + 1) {
                if state == other {
                    return Some((i, j));
                }
            }
        }
        None
    }
}
