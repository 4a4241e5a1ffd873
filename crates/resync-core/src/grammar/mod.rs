//! Compiled grammar tables.
//!
//! A [`Grammar`] is what the grammar compiler produces and what the parser
//! consumes: one DFA per rule, a label table mapping small integers to
//! terminals and rules, keyword and token lookup tables, and per-rule FIRST
//! bitmaps.
//!
//! # Ids
//!
//! - Rules are identified by [`SymbolId`]s starting at [`FIRST_SYMBOL_ID`]
//!   (256), so they never collide with token kind ids.
//! - Arcs are labelled with [`LabelId`]s. Label 0 is reserved and never
//!   referenced by an arc. Labels fit in a byte, which is what lets a FIRST
//!   set be a 32-byte bitmap.
//!
//! # Sharing
//!
//! All tables sit behind `Arc`, so cloning a grammar is cheap and variants
//! (see [`Grammar::variant`]) only copy the table they change.

mod config;
mod first_set;
mod variant;


use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::token::{Token, TokenKind};

pub use config::GrammarConfig;
pub use first_set::FirstSet;
pub use variant::GrammarVariant;

/// Rule id. Always `>= FIRST_SYMBOL_ID`.
pub type SymbolId = u16;

/// Index into the grammar's label table.
pub type LabelId = u8;

/// Index of a state within one rule's DFA.
pub type StateId = u16;

pub const FIRST_SYMBOL_ID: SymbolId = 256;

/// What a label stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelTarget {
    /// Slot 0 of the label table.
    Reserved,
    /// A sub-rule; matching it means descending into that rule's DFA.
    Symbol(SymbolId),
    /// Any token of this kind.
    Token(TokenKind),
    /// A token of the keyword kind with one particular value.
    Keyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub label: LabelId,
    pub target: StateId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DfaState {
    pub arcs: Vec<Transition>,
    pub accepting: bool,
}

/// DFA of a single rule. State 0 is the start state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserDfa {
    pub symbol: SymbolId,
    pub states: Vec<DfaState>,
    pub first: FirstSet,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token {} at line {}", .token, .token.line)]
pub struct ClassifyError {
    pub token: Token,
}

/// Raw tables handed over by the grammar compiler.
#[derive(Debug, Clone, Default)]
pub struct GrammarTables {
    /// Rule names in id order (the first entry has id 256).
    pub symbols: IndexMap<String, SymbolId>,
    /// DFAs in id order.
    pub dfas: Vec<ParserDfa>,
    pub labels: Vec<LabelTarget>,
    pub token_ids: IndexMap<TokenKind, LabelId>,
    pub keyword_ids: IndexMap<String, LabelId>,
    /// Human-readable terminal expected when a label is the only way forward.
    pub expected_strings: HashMap<LabelId, String>,
    pub start: SymbolId,
}

/// Immutable, cheaply clonable parser tables.
#[derive(Debug, Clone)]
pub struct Grammar {
    symbols: Arc<IndexMap<String, SymbolId>>,
    dfas: Arc<[ParserDfa]>,
    labels: Arc<[LabelTarget]>,
    token_ids: Arc<IndexMap<TokenKind, LabelId>>,
    keyword_ids: Arc<IndexMap<String, LabelId>>,
    expected_strings: Arc<HashMap<LabelId, String>>,
    start: SymbolId,
    config: Arc<GrammarConfig>,
}

impl Grammar {
    pub fn new(tables: GrammarTables, config: GrammarConfig) -> Self {
        Self {
            symbols: Arc::new(tables.symbols),
            dfas: tables.dfas.into(),
            labels: tables.labels.into(),
            token_ids: Arc::new(tables.token_ids),
            keyword_ids: Arc::new(tables.keyword_ids),
            expected_strings: Arc::new(tables.expected_strings),
            start: tables.start,
            config: Arc::new(config),
        }
    }

    /// Id of the first rule in the grammar source.
    pub fn start(&self) -> SymbolId {
        self.start
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    pub fn symbol_name(&self, symbol: SymbolId) -> Option<&str> {
        let index = symbol.checked_sub(FIRST_SYMBOL_ID)?;
        self.symbols
            .get_index(index as usize)
            .map(|(name, _)| name.as_str())
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.symbols.iter().map(|(name, &id)| (name.as_str(), id))
    }

    pub fn dfas(&self) -> &[ParserDfa] {
        &self.dfas
    }

    /// Whether `symbol` names a rule of this grammar.
    pub fn is_rule(&self, symbol: SymbolId) -> bool {
        symbol
            .checked_sub(FIRST_SYMBOL_ID)
            .is_some_and(|index| (index as usize) < self.dfas.len())
    }

    /// DFA of a rule.
    ///
    /// Panics unless [`Grammar::is_rule`] holds for `symbol`. Symbol ids
    /// reached through the label table always are rules.
    pub fn dfa(&self, symbol: SymbolId) -> &ParserDfa {
        &self.dfas[(symbol - FIRST_SYMBOL_ID) as usize]
    }

    pub fn labels(&self) -> &[LabelTarget] {
        &self.labels
    }

    #[inline]
    pub fn label(&self, label: LabelId) -> LabelTarget {
        self.labels[label as usize]
    }

    pub fn token_ids(&self) -> &IndexMap<TokenKind, LabelId> {
        &self.token_ids
    }

    pub fn keyword_ids(&self) -> &IndexMap<String, LabelId> {
        &self.keyword_ids
    }

    pub fn is_keyword(&self, value: &str) -> bool {
        self.keyword_ids.contains_key(value)
    }

    /// Terminal text to suggest when `label` is the only acceptable arc.
    pub fn expected_str(&self, label: LabelId) -> Option<&str> {
        self.expected_strings.get(&label).map(String::as_str)
    }

    /// Map a token to the label it matches.
    ///
    /// Tokens of the keyword kind whose value is a keyword get the keyword's
    /// own label; everything else is looked up by kind.
    pub fn classify(&self, token: &Token) -> Result<LabelId, ClassifyError> {
        if token.kind == self.config.keyword_kind()
            && let Some(&label) = self.keyword_ids.get(token.value.as_str())
        {
            return Ok(label);
        }
        self.token_ids
            .get(&token.kind)
            .copied()
            .ok_or_else(|| ClassifyError {
                token: token.clone(),
            })
    }

    /// Tokens the repair search may insert, in label order.
    ///
    /// Every token kind known to the grammar contributes one placeholder
    /// token. The keyword kind contributes a placeholder that is not itself
    /// a keyword, followed by every keyword.
    pub fn insertion_candidates(&self) -> Vec<Token> {
        let keyword_kind = self.config.keyword_kind();
        let mut candidates = Vec::new();
        let mut keywords_added = false;

        for &kind in self.token_ids.keys() {
            if !self.config.can_insert(kind) {
                continue;
            }
            if kind == keyword_kind {
                candidates.push(Token::synthetic(kind, self.placeholder_name()));
                candidates.extend(self.keyword_tokens());
                keywords_added = true;
            } else {
                candidates.push(Token::synthetic(kind, "fake"));
            }
        }

        if !keywords_added && self.config.can_insert(keyword_kind) {
            candidates.extend(self.keyword_tokens());
        }
        candidates
    }

    fn keyword_tokens(&self) -> impl Iterator<Item = Token> + '_ {
        let kind = self.config.keyword_kind();
        self.keyword_ids
            .keys()
            .map(move |keyword| Token::synthetic(kind, keyword.clone()))
    }

    fn placeholder_name(&self) -> String {
        let mut name = String::from("keyword");
        while self.keyword_ids.contains_key(&name) {
            name.push('_');
        }
        name
    }

    /// Start a variant of this grammar that shares every unchanged table.
    pub fn variant(&self) -> GrammarVariant<'_> {
        GrammarVariant::new(self)
    }

    /// Readable name of a label, as used in dumps and traces.
    pub fn label_name(&self, label: LabelId) -> String {
        match self.labels.get(label as usize) {
            Some(LabelTarget::Reserved) | None => format!("<label {label}>"),
            Some(LabelTarget::Symbol(symbol)) => self
                .symbol_name(*symbol)
                .map_or_else(|| format!("<symbol {symbol}>"), str::to_owned),
            Some(LabelTarget::Token(kind)) => kind.name().to_owned(),
            Some(LabelTarget::Keyword) => self
                .keyword_ids
                .iter()
                .find(|&(_, &l)| l == label)
                .map_or_else(|| format!("<keyword {label}>"), |(kw, _)| format!("'{kw}'")),
        }
    }

    /// Render every rule's DFA, one state per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let start = self.symbol_name(self.start).unwrap_or("?");
        writeln!(out, "start: {start}").expect("String write never fails");

        for dfa in self.dfas.iter() {
            let name = self.symbol_name(dfa.symbol).unwrap_or("?");
            let first: Vec<_> = dfa.first.iter().map(|l| self.label_name(l)).collect();
            writeln!(out, "{name} = {}, first {{{}}}", dfa.symbol, first.join(", "))
                .expect("String write never fails");

            for (index, state) in dfa.states.iter().enumerate() {
                let mut line = format!("  s{index}");
                if state.accepting {
                    line.push_str(" (final)");
                }
                if !state.arcs.is_empty() {
                    let arcs: Vec<_> = state
                        .arcs
                        .iter()
                        .map(|arc| format!("{} -> s{}", self.label_name(arc.label), arc.target))
                        .collect();
                    line.push_str(": ");
                    line.push_str(&arcs.join(", "));
                }
                writeln!(out, "{line}").expect("String write never fails");
            }
        }
        out
    }
}
