//! FIRST sets over raw labels.
//!
//! A rule's FIRST set is the set of terminals that can start it, found by
//! expanding the arcs of its start state. Expansion fails on left recursion
//! and when two arcs of a start state can begin with the same terminal, since
//! the parser picks an arc by looking at one token only.

use std::collections::HashMap;

use indexmap::IndexSet;

use super::GrammarError;
use super::meta::ParsedGrammar;
use super::nfa::RawLabel;

enum Slot {
    Pending,
    InProgress,
    Done(IndexSet<RawLabel>),
}

/// FIRST set of every rule, indexed like `grammar.rules`.
pub(crate) fn first_sets(grammar: &ParsedGrammar) -> Result<Vec<IndexSet<RawLabel>>, GrammarError> {
    let mut slots: Vec<Slot> = (0..grammar.rules.len()).map(|_| Slot::Pending).collect();
    for rule in 0..grammar.rules.len() {
        if matches!(slots[rule], Slot::Pending) {
            first_of(grammar, rule, &mut slots)?;
        }
    }
    Ok(slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Done(set) => set,
            Slot::Pending | Slot::InProgress => IndexSet::new(),
        })
        .collect())
}

fn first_of(
    grammar: &ParsedGrammar,
    rule: usize,
    slots: &mut [Slot],
) -> Result<IndexSet<RawLabel>, GrammarError> {
    slots[rule] = Slot::InProgress;

    let start = &grammar.rules[rule].states[0];
    let mut all = IndexSet::new();
    let mut per_arc = Vec::with_capacity(start.arcs.len());

    for &label in start.arcs.keys() {
        let labels = match grammar.rule_index(label) {
            Some(sub) => match &slots[sub] {
                Slot::InProgress => {
                    return Err(GrammarError::LeftRecursion(
                        grammar.rule_name(rule).to_owned(),
                    ));
                }
                Slot::Done(set) => set.clone(),
                Slot::Pending => first_of(grammar, sub, slots)?,
            },
            None => IndexSet::from([label]),
        };
        all.extend(labels.iter().copied());
        per_arc.push((label, labels));
    }

    let mut owner: HashMap<RawLabel, RawLabel> = HashMap::new();
    for (label, labels) in &per_arc {
        for &terminal in labels {
            if owner.insert(terminal, *label).is_some() {
                return Err(GrammarError::Ambiguous {
                    rule: grammar.rule_name(rule).to_owned(),
                    label: grammar.label_text(*label).to_owned(),
                });
            }
        }
    }

    slots[rule] = Slot::Done(all.clone());
    Ok(all)
}
