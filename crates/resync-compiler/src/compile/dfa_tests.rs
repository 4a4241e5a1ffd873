use super::dfa::RawDfa;
use super::nfa::Nfa;

/// `a | b` with the alternatives joined through an outer start/end pair.
fn alternation() -> (Nfa, usize, usize) {
    let mut nfa = Nfa::new();
    let (a0, a1) = (nfa.add_state(), nfa.add_state());
    nfa.arc(a0, a1, 0);
    let (start, end) = (nfa.add_state(), nfa.add_state());
    let (b0, b1) = (nfa.add_state(), nfa.add_state());
    nfa.arc(b0, b1, 1);
    nfa.epsilon(start, a0);
    nfa.epsilon(a1, end);
    nfa.epsilon(start, b0);
    nfa.epsilon(b1, end);
    (nfa, start, end)
}

fn arcs(dfa: &RawDfa, state: usize) -> Vec<(usize, usize)> {
    dfa.states[state]
        .arcs
        .iter()
        .map(|(&label, &target)| (label, target))
        .collect()
}

#[test]
fn subset_construction_follows_epsilons() {
    let (nfa, start, end) = alternation();
    let dfa = RawDfa::from_nfa(&nfa, start, end);

    assert_eq!(dfa.states.len(), 3);
    assert_eq!(arcs(&dfa, 0), vec![(0, 1), (1, 2)]);
    assert!(!dfa.states[0].accepting);
    assert!(dfa.states[1].accepting);
    assert!(dfa.states[2].accepting);
}

#[test]
fn simplify_merges_equivalent_states() {
    let (nfa, start, end) = alternation();
    let mut dfa = RawDfa::from_nfa(&nfa, start, end);
    dfa.simplify();

    assert_eq!(dfa.states.len(), 2);
    assert_eq!(arcs(&dfa, 0), vec![(0, 1), (1, 1)]);
    assert!(dfa.states[1].accepting);
}

#[test]
fn simplify_merges_loop_with_its_entry() {
    // x* y
    let mut nfa = Nfa::new();
    let (x0, x1) = (nfa.add_state(), nfa.add_state());
    nfa.arc(x0, x1, 0);
    nfa.epsilon(x1, x0);
    let (y0, y1) = (nfa.add_state(), nfa.add_state());
    nfa.arc(y0, y1, 1);
    nfa.epsilon(x0, y0);

    let mut dfa = RawDfa::from_nfa(&nfa, x0, y1);
    assert_eq!(dfa.states.len(), 3);
    dfa.simplify();

    assert_eq!(dfa.states.len(), 2);
    assert_eq!(arcs(&dfa, 0), vec![(0, 0), (1, 1)]);
    assert!(!dfa.states[0].accepting);
    assert!(dfa.states[1].accepting);
}

#[test]
fn equality_ignores_arc_order() {
    let mut nfa = Nfa::new();
    let start = nfa.add_state();
    let end = nfa.add_state();
    let (p, q) = (nfa.add_state(), nfa.add_state());
    // Two branches reaching `end` with labels in opposite order.
    nfa.arc(start, p, 0);
    nfa.arc(start, q, 1);
    nfa.arc(p, end, 2);
    nfa.arc(p, end, 3);
    nfa.arc(q, end, 3);
    nfa.arc(q, end, 2);

    let mut dfa = RawDfa::from_nfa(&nfa, start, end);
    dfa.simplify();

    assert_eq!(dfa.states.len(), 3);
    assert_eq!(arcs(&dfa, 0), vec![(0, 1), (1, 1)]);
}
