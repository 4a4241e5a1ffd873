//! Table-driven byte automata.
//!
//! An automaton is built from one arc map per state plus an accept flag per
//! state, and flattened into a single `states * max_byte` transition table.
//! Bytes at or above `max_byte` fall through to a per-state default row, so
//! states that accept "anything else" (string bodies, comments) do not need
//! a full 256-entry row.
//!
//! State 255 is reserved as the ERROR state: a transition into it means the
//! automaton cannot continue. Automata therefore hold at most 254 real states.
//!
//! Two matching modes exist:
//! - [`MatchMode::Greedy`] returns the end of the longest match, falling back
//!   one step when the automaton dies right after an accepting state.
//! - [`MatchMode::NonGreedy`] returns the first position at which the
//!   automaton is accepting.

use std::ops::RangeInclusive;

/// Transition target meaning "no transition".
pub const ERROR_STATE: u8 = 255;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("automaton has no states")]
    Empty,

    #[error("automaton has {0} states, at most 254 are allowed")]
    TooManyStates(usize),

    #[error("{accepts} accept flags for {states} states")]
    AcceptsMismatch { states: usize, accepts: usize },

    #[error("start state {0} is out of range")]
    StartOutOfRange(usize),

    #[error("state {state} has a transition to missing state {target}")]
    TargetOutOfRange { state: usize, target: u8 },
}

/// Outgoing arcs of one state, before flattening.
///
/// Later arcs for the same byte override earlier ones, which lets a state be
/// described as a broad class followed by exceptions.
#[derive(Debug, Clone, Default)]
pub struct StateArcs {
    arcs: Vec<(u8, u8)>,
    default: Option<u8>,
}

impl StateArcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transition on each of `bytes`.
    pub fn on(mut self, bytes: &[u8], target: u8) -> Self {
        self.arcs.extend(bytes.iter().map(|&b| (b, target)));
        self
    }

    /// Add a transition on every byte of `range`.
    pub fn on_range(mut self, range: RangeInclusive<u8>, target: u8) -> Self {
        self.arcs.extend(range.map(|b| (b, target)));
        self
    }

    /// Transition taken for any byte without an explicit arc.
    pub fn otherwise(mut self, target: u8) -> Self {
        self.default = Some(target);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    Greedy,
    NonGreedy,
}

/// A compiled byte automaton.
#[derive(Debug, Clone)]
pub struct Automaton {
    table: Box<[u8]>,
    defaults: Box<[u8]>,
    accepts: Box<[bool]>,
    max_byte: usize,
    start: u8,
    mode: MatchMode,
}

impl Automaton {
    /// Build a greedy automaton starting in state 0.
    pub fn greedy(states: &[StateArcs], accepts: &[bool]) -> Result<Self, AutomatonError> {
        Self::build(states, accepts, 0, MatchMode::Greedy)
    }

    /// Build a non-greedy automaton starting in state 0.
    pub fn non_greedy(states: &[StateArcs], accepts: &[bool]) -> Result<Self, AutomatonError> {
        Self::build(states, accepts, 0, MatchMode::NonGreedy)
    }

    pub fn build(
        states: &[StateArcs],
        accepts: &[bool],
        start: usize,
        mode: MatchMode,
    ) -> Result<Self, AutomatonError> {
        if states.is_empty() {
            return Err(AutomatonError::Empty);
        }
        if states.len() >= ERROR_STATE as usize {
            return Err(AutomatonError::TooManyStates(states.len()));
        }
        if accepts.len() != states.len() {
            return Err(AutomatonError::AcceptsMismatch {
                states: states.len(),
                accepts: accepts.len(),
            });
        }
        if start >= states.len() {
            return Err(AutomatonError::StartOutOfRange(start));
        }

        for (index, state) in states.iter().enumerate() {
            let targets = state.arcs.iter().map(|&(_, t)| t).chain(state.default);
            for target in targets {
                if target as usize >= states.len() {
                    return Err(AutomatonError::TargetOutOfRange {
                        state: index,
                        target,
                    });
                }
            }
        }

        let max_byte = states
            .iter()
            .flat_map(|s| s.arcs.iter().map(|&(b, _)| b as usize + 1))
            .max()
            .unwrap_or(0);

        let mut table = vec![ERROR_STATE; states.len() * max_byte];
        let mut defaults = vec![ERROR_STATE; states.len()];
        for (index, state) in states.iter().enumerate() {
            let row = &mut table[index * max_byte..(index + 1) * max_byte];
            if let Some(default) = state.default {
                row.fill(default);
                defaults[index] = default;
            }
            for &(byte, target) in &state.arcs {
                row[byte as usize] = target;
            }
        }

        Ok(Self {
            table: table.into_boxed_slice(),
            defaults: defaults.into_boxed_slice(),
            accepts: accepts.into(),
            max_byte,
            start: start as u8,
            mode,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn state_count(&self) -> usize {
        self.accepts.len()
    }

    /// One past the largest byte with an explicit arc in any state.
    pub fn max_byte(&self) -> usize {
        self.max_byte
    }

    /// Flattened transition table, `state_count() * max_byte()` entries.
    pub fn table(&self) -> &[u8] {
        &self.table
    }

    /// Per-state target for bytes at or above `max_byte()`.
    pub fn defaults(&self) -> &[u8] {
        &self.defaults
    }

    #[inline]
    fn next_state(&self, state: u8, byte: u8) -> u8 {
        let byte = byte as usize;
        if byte >= self.max_byte {
            self.defaults[state as usize]
        } else {
            self.table[state as usize * self.max_byte + byte]
        }
    }

    #[inline]
    fn is_accepting(&self, state: u8) -> bool {
        self.accepts[state as usize]
    }

    /// Match `input` starting at `pos`, returning the end offset of the match.
    ///
    /// Returns `None` when the automaton never reaches a usable accepting
    /// state. The result never exceeds `input.len()`.
    pub fn recognize(&self, input: &[u8], pos: usize) -> Option<usize> {
        if pos > input.len() {
            return None;
        }
        match self.mode {
            MatchMode::Greedy => self.recognize_greedy(input, pos),
            MatchMode::NonGreedy => self.recognize_non_greedy(input, pos),
        }
    }

    fn recognize_greedy(&self, input: &[u8], pos: usize) -> Option<usize> {
        let mut state = self.start;
        let mut last_accept = false;
        for (i, &byte) in input.iter().enumerate().skip(pos) {
            let accept = self.is_accepting(state);
            let next = self.next_state(state, byte);
            if next == ERROR_STATE {
                if accept {
                    return Some(i);
                }
                // The automaton died one step after leaving an accepting
                // state; the match ends before the byte that led out of it.
                if last_accept {
                    return Some(i - 1);
                }
                return None;
            }
            state = next;
            last_accept = accept;
        }
        if self.is_accepting(state) {
            Some(input.len())
        } else if last_accept {
            Some(input.len() - 1)
        } else {
            None
        }
    }

    fn recognize_non_greedy(&self, input: &[u8], pos: usize) -> Option<usize> {
        let mut state = self.start;
        for (i, &byte) in input.iter().enumerate().skip(pos) {
            if self.is_accepting(state) {
                return Some(i);
            }
            state = self.next_state(state, byte);
            if state == ERROR_STATE {
                return None;
            }
        }
        self.is_accepting(state).then_some(input.len())
    }
}
