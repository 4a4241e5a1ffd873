//! Hand-built automata used by the lexer.
//!
//! `PSEUDO_TOKEN` recognizes one token (after optional leading whitespace)
//! of any kind: names with string prefixes, numbers in every radix, operators,
//! comments, newlines, backslash continuations, and the opening part of
//! string literals. String bodies that span lines are finished by the
//! `*_END` automata.

use std::sync::LazyLock;

use resync_core::{Automaton, StateArcs};

const DIGITS: std::ops::RangeInclusive<u8> = b'0'..=b'9';
const OCTAL: std::ops::RangeInclusive<u8> = b'0'..=b'7';

fn name_chars(state: StateArcs, target: u8) -> StateArcs {
    state
        .on_range(b'A'..=b'Z', target)
        .on_range(b'a'..=b'z', target)
        .on(b"_", target)
}

fn hex_digits(state: StateArcs, target: u8) -> StateArcs {
    state
        .on_range(DIGITS, target)
        .on_range(b'A'..=b'F', target)
        .on_range(b'a'..=b'f', target)
}

#[rustfmt::skip]
const PSEUDO_ACCEPTS: [bool; 44] = [
    true, true, true, true, true, true, true, true,
    true, true, false, true, true, true, true, false,
    false, false, true, false, false, true, false,
    false, true, false, true, false, true, false,
    false, true, false, false, true, true, true,
    false, false, true, false, false, false, true,
];

fn pseudo_token_states() -> Vec<StateArcs> {
    let s = StateArcs::new;
    vec![
        // 0: start
        name_chars(s(), 1)
            .on(b"BbUu", 2)
            .on(b"Rr", 3)
            .on(b"\t\x0c ", 0)
            .on(b"\n", 13)
            .on(b"\r", 14)
            .on(b"!", 10)
            .on(b"\"", 16)
            .on(b"#", 18)
            .on(b"%&+-=^|", 12)
            .on(b"'", 15)
            .on(b"(),:;@[]`{}~", 13)
            .on(b"*", 7)
            .on(b".", 6)
            .on(b"/", 11)
            .on(b"0", 4)
            .on_range(b'1'..=b'9', 5)
            .on(b"<", 9)
            .on(b">", 8)
            .on(b"\\", 17),
        // 1: name
        name_chars(s(), 1).on_range(DIGITS, 1),
        // 2: u/b prefix
        name_chars(s(), 1).on_range(DIGITS, 1).on(b"Rr", 3).on(b"\"", 16).on(b"'", 15),
        // 3: r prefix
        name_chars(s(), 1).on_range(DIGITS, 1).on(b"\"", 16).on(b"'", 15),
        // 4: leading zero
        s().on(b".", 24)
            .on_range(OCTAL, 21)
            .on(b"89", 23)
            .on(b"Bb", 22)
            .on(b"Ee", 25)
            .on(b"JjLl", 13)
            .on(b"Oo", 20)
            .on(b"Xx", 19),
        // 5: decimal
        s().on(b".", 24).on_range(DIGITS, 5).on(b"Ee", 25).on(b"JjLl", 13),
        // 6: dot
        s().on_range(DIGITS, 26),
        // 7: *
        s().on(b"*", 12).on(b"=", 13),
        // 8: >
        s().on(b"=", 13).on(b">", 12),
        // 9: <
        s().on(b"<", 12).on(b"=", 13).on(b">", 13),
        // 10: !
        s().on(b"=", 13),
        // 11: /
        s().on(b"/", 12).on(b"=", 13),
        // 12: operator that may take a trailing =
        s().on(b"=", 13),
        // 13: done
        s(),
        // 14: \r
        s().on(b"\n", 13),
        // 15: '
        s().otherwise(30).on(b"\n\r", 27).on(b"'", 28).on(b"\\", 29),
        // 16: "
        s().otherwise(33).on(b"\n\r", 27).on(b"\"", 31).on(b"\\", 32),
        // 17: backslash
        s().on(b"\n", 13).on(b"\r", 14),
        // 18: comment
        s().otherwise(18).on(b"\n\r", 27),
        // 19: 0x
        hex_digits(s(), 34),
        // 20: 0o
        s().on_range(OCTAL, 35),
        // 21: old-style octal
        s().on(b".", 24)
            .on_range(OCTAL, 21)
            .on(b"89", 23)
            .on(b"Ee", 25)
            .on(b"JjLl", 13),
        // 22: 0b
        s().on(b"01", 36),
        // 23: zero-prefixed decimal
        s().on(b".", 24).on_range(DIGITS, 23).on(b"Ee", 25).on(b"Jj", 13),
        // 24: fraction
        s().on_range(DIGITS, 24).on(b"Ee", 37).on(b"Jj", 13),
        // 25: exponent after integer part
        s().on(b"+-", 38).on_range(DIGITS, 39),
        // 26: fraction after leading dot
        s().on_range(DIGITS, 26).on(b"Ee", 37).on(b"Jj", 13),
        // 27: dead end
        s(),
        // 28: ''
        s().on(b"'", 13),
        // 29: escape in '
        s().otherwise(40).on(b"\n", 13).on(b"\r", 14),
        // 30: body of '
        s().otherwise(30).on(b"\n\r", 27).on(b"'", 13).on(b"\\", 29),
        // 31: ""
        s().on(b"\"", 13),
        // 32: escape in "
        s().otherwise(41).on(b"\n", 13).on(b"\r", 14),
        // 33: body of "
        s().otherwise(33).on(b"\n\r", 27).on(b"\"", 13).on(b"\\", 32),
        // 34: hex
        hex_digits(s(), 34).on(b"Ll", 13),
        // 35: octal
        s().on_range(OCTAL, 35).on(b"Ll", 13),
        // 36: binary
        s().on(b"01", 36).on(b"Ll", 13),
        // 37: exponent after fraction
        s().on(b"+-", 42).on_range(DIGITS, 43),
        // 38: signed exponent
        s().on_range(DIGITS, 39),
        // 39: exponent digits
        s().on_range(DIGITS, 39).on(b"Jj", 13),
        // 40: body of ' after escape
        s().otherwise(40).on(b"\n\r", 27).on(b"'", 13).on(b"\\", 29),
        // 41: body of " after escape
        s().otherwise(41).on(b"\n\r", 27).on(b"\"", 13).on(b"\\", 32),
        // 42: signed exponent after fraction
        s().on_range(DIGITS, 43),
        // 43: exponent digits after fraction
        s().on_range(DIGITS, 43).on(b"Jj", 13),
    ]
}

/// Finishes a triple-quoted string; non-greedy so it stops at the first
/// closing triple quote.
fn triple_quote_end(quote: u8) -> Automaton {
    let q = &[quote][..];
    let states = [
        StateArcs::new().otherwise(0).on(q, 1).on(b"\\", 2),
        StateArcs::new().otherwise(4).on(q, 3).on(b"\\", 2),
        StateArcs::new().otherwise(4),
        StateArcs::new().otherwise(4).on(q, 5).on(b"\\", 2),
        StateArcs::new().otherwise(4).on(q, 1).on(b"\\", 2),
        StateArcs::new().otherwise(4).on(q, 5).on(b"\\", 2),
    ];
    Automaton::non_greedy(&states, &[false, false, false, false, false, true])
        .expect("triple-quote table is well formed")
}

/// Finishes a single-quoted string continued with a backslash.
fn single_quote_end(quote: u8) -> Automaton {
    let q = &[quote][..];
    let states = [
        StateArcs::new().otherwise(0).on(q, 1).on(b"\\", 2),
        StateArcs::new(),
        StateArcs::new().otherwise(3),
        StateArcs::new().otherwise(3).on(q, 1).on(b"\\", 2),
    ];
    Automaton::greedy(&states, &[false, true, false, false])
        .expect("string-end table is well formed")
}

pub static PSEUDO_TOKEN: LazyLock<Automaton> = LazyLock::new(|| {
    Automaton::greedy(&pseudo_token_states(), &PSEUDO_ACCEPTS)
        .expect("pseudo-token table is well formed")
});

pub static WHITESPACE: LazyLock<Automaton> = LazyLock::new(|| {
    Automaton::greedy(&[StateArcs::new().on(b"\t\x0c ", 0)], &[true])
        .expect("whitespace table is well formed")
});

pub static SINGLE_QUOTE_END: LazyLock<Automaton> = LazyLock::new(|| single_quote_end(b'\''));
pub static DOUBLE_QUOTE_END: LazyLock<Automaton> = LazyLock::new(|| single_quote_end(b'"'));
pub static SINGLE_TRIPLE_END: LazyLock<Automaton> = LazyLock::new(|| triple_quote_end(b'\''));
pub static DOUBLE_TRIPLE_END: LazyLock<Automaton> = LazyLock::new(|| triple_quote_end(b'"'));
