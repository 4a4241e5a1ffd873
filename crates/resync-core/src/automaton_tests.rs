use super::automaton::*;

fn ab_plus(mode: MatchMode) -> Automaton {
    // a b+
    let states = [
        StateArcs::new().on(b"a", 1),
        StateArcs::new().on(b"b", 2),
        StateArcs::new().on(b"b", 2),
    ];
    Automaton::build(&states, &[false, false, true], 0, mode).unwrap()
}

#[test]
fn flattens_explicit_arcs() {
    let states = [StateArcs::new().on(b"\x00", 1), StateArcs::new().on(b"\x01", 0)];
    let dfa = Automaton::greedy(&states, &[false, true]).unwrap();

    assert_eq!(dfa.table(), b"\x01\xff\xff\x00");
    assert_eq!(dfa.defaults(), b"\xff\xff");
    assert_eq!(dfa.max_byte(), 2);
}

#[test]
fn default_arc_fills_row_and_default_table() {
    let states = [StateArcs::new().on(b"\x00", 1), StateArcs::new().otherwise(0)];
    let dfa = Automaton::greedy(&states, &[false, true]).unwrap();

    assert_eq!(dfa.table(), b"\x01\x00");
    assert_eq!(dfa.defaults(), b"\xff\x00");
    assert_eq!(dfa.max_byte(), 1);
}

#[test]
fn later_arcs_override_earlier_ones() {
    let states = [
        StateArcs::new().on_range(b'a'..=b'z', 1).on(b"q", 0),
        StateArcs::new(),
    ];
    let dfa = Automaton::greedy(&states, &[false, true]).unwrap();

    assert_eq!(dfa.recognize(b"x", 0), Some(1));
    assert_eq!(dfa.recognize(b"q", 0), None);
}

#[test]
fn rejects_malformed_tables() {
    let too_many = vec![StateArcs::new(); 255];
    let accepts = vec![true; 255];
    assert_eq!(
        Automaton::greedy(&too_many, &accepts).unwrap_err(),
        AutomatonError::TooManyStates(255)
    );

    assert_eq!(
        Automaton::greedy(&[StateArcs::new()], &[true, false]).unwrap_err(),
        AutomatonError::AcceptsMismatch {
            states: 1,
            accepts: 2
        }
    );

    assert_eq!(
        Automaton::greedy(&[StateArcs::new().on(b"a", 3)], &[true]).unwrap_err(),
        AutomatonError::TargetOutOfRange {
            state: 0,
            target: 3
        }
    );

    assert_eq!(
        Automaton::greedy(&[], &[]).unwrap_err(),
        AutomatonError::Empty
    );
}

#[test]
fn greedy_takes_longest_match() {
    let dfa = ab_plus(MatchMode::Greedy);

    assert_eq!(dfa.recognize(b"abbb", 0), Some(4));
    assert_eq!(dfa.recognize(b"abbbc", 0), Some(4));
    assert_eq!(dfa.recognize(b"xxab", 2), Some(4));
    assert_eq!(dfa.recognize(b"a", 0), None);
    assert_eq!(dfa.recognize(b"c", 0), None);
}

#[test]
fn non_greedy_stops_at_first_accept() {
    let dfa = ab_plus(MatchMode::NonGreedy);

    assert_eq!(dfa.recognize(b"abbb", 0), Some(2));
    assert_eq!(dfa.recognize(b"ab", 0), Some(2));
    assert_eq!(dfa.recognize(b"ac", 0), None);
    assert_eq!(dfa.recognize(b"a", 0), None);
}

#[test]
fn greedy_falls_back_one_step() {
    // "1e" followed by a non-digit: the exponent state is not accepting,
    // so the match ends after the mantissa.
    let states = [
        StateArcs::new().on_range(b'0'..=b'9', 1),
        StateArcs::new().on_range(b'0'..=b'9', 1).on(b"e", 2),
        StateArcs::new().on_range(b'0'..=b'9', 3),
        StateArcs::new().on_range(b'0'..=b'9', 3),
    ];
    let dfa = Automaton::greedy(&states, &[false, true, false, true]).unwrap();

    assert_eq!(dfa.recognize(b"1e ", 0), Some(1));
    assert_eq!(dfa.recognize(b"1e", 0), Some(1));
    assert_eq!(dfa.recognize(b"1e5", 0), Some(3));
}

#[test]
fn bytes_above_table_use_defaults() {
    let states = [
        StateArcs::new().on(b"'", 1).otherwise(0),
        StateArcs::new(),
    ];
    let dfa = Automaton::non_greedy(&states, &[false, true]).unwrap();

    assert_eq!(dfa.max_byte(), b'\'' as usize + 1);
    assert_eq!(dfa.recognize("héllo'".as_bytes(), 0), Some(7));
    assert_eq!(dfa.recognize(b"hello", 0), None);
}

#[test]
fn empty_input_range() {
    let accepting = Automaton::greedy(&[StateArcs::new()], &[true]).unwrap();
    assert_eq!(accepting.recognize(b"abc", 3), Some(3));
    assert_eq!(accepting.recognize(b"abc", 4), None);

    let rejecting = ab_plus(MatchMode::Greedy);
    assert_eq!(rejecting.recognize(b"", 0), None);
}

#[test]
fn greedy_never_shorter_than_non_greedy() {
    let greedy = ab_plus(MatchMode::Greedy);
    let lazy = ab_plus(MatchMode::NonGreedy);
    let inputs: [&[u8]; 6] = [b"ab", b"abb", b"abbbbx", b"xab", b"a", b""];

    for input in inputs {
        for pos in 0..=input.len() {
            let g = greedy.recognize(input, pos);
            let n = lazy.recognize(input, pos);
            if let Some(g) = g {
                assert!(g <= input.len());
            }
            if let (Some(g), Some(n)) = (g, n) {
                assert!(g >= n, "{input:?} at {pos}: greedy {g} < non-greedy {n}");
            }
        }
    }
}
