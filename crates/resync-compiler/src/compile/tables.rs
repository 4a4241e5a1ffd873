//! Label assignment and final table layout.
//!
//! Raw labels are the grammar's own spelling of a terminal or rule
//! reference: `NAME`, `expr`, `'if'`, `'+'`. Each distinct meaning gets one
//! entry in the label table, created the first time it is referenced:
//!
//! - a lower-case or mixed-case name that is a rule becomes a symbol label;
//! - an all-caps name becomes a token-kind label;
//! - a quoted word becomes a keyword label;
//! - any other quoted text is looked up in the operator map and becomes a
//!   token-kind label.
//!
//! Label 0 is reserved.

use std::collections::HashMap;

use indexmap::IndexSet;
use resync_core::{
    DfaState, FIRST_SYMBOL_ID, FirstSet, GrammarConfig, GrammarTables, LabelId, LabelTarget,
    ParserDfa, StateId, SymbolId, TokenKind, Transition,
};

use super::GrammarError;
use super::meta::ParsedGrammar;
use super::nfa::RawLabel;

pub(crate) fn build(
    grammar: &ParsedGrammar,
    firsts: &[IndexSet<RawLabel>],
    config: &GrammarConfig,
) -> Result<GrammarTables, GrammarError> {
    let mut builder = TableBuilder {
        grammar,
        firsts,
        config,
        tables: GrammarTables::default(),
        symbol_labels: HashMap::new(),
    };
    builder.tables.labels.push(LabelTarget::Reserved);

    // Start rule first, the rest alphabetically.
    let start = grammar.rule_name(0);
    let mut names: Vec<&str> = grammar
        .rules
        .keys()
        .map(String::as_str)
        .filter(|&name| name != start)
        .collect();
    names.sort_unstable();
    names.insert(0, start);

    for (offset, name) in names.iter().enumerate() {
        let id = FIRST_SYMBOL_ID + offset as SymbolId;
        builder.tables.symbols.insert((*name).to_owned(), id);
    }

    for name in names {
        builder.add_rule(name)?;
    }
    builder.tables.start = FIRST_SYMBOL_ID;
    Ok(builder.tables)
}

struct TableBuilder<'a> {
    grammar: &'a ParsedGrammar,
    firsts: &'a [IndexSet<RawLabel>],
    config: &'a GrammarConfig,
    tables: GrammarTables,
    symbol_labels: HashMap<SymbolId, LabelId>,
}

fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

fn is_quoted(text: &str) -> bool {
    text.starts_with(['\'', '"'])
}

fn unquote(text: &str) -> &str {
    text.trim_matches(['\'', '"'])
}

impl TableBuilder<'_> {
    fn add_rule(&mut self, name: &str) -> Result<(), GrammarError> {
        let (grammar, firsts) = (self.grammar, self.firsts);
        let rule = grammar.rules.get_index_of(name).unwrap_or(0);
        let raw = &grammar.rules[rule];

        let mut states = Vec::with_capacity(raw.states.len());
        for state in &raw.states {
            let mut arcs: Vec<Transition> = Vec::with_capacity(state.arcs.len());
            for (&label, &target) in &state.arcs {
                let arc = Transition {
                    label: self.make_label(label)?,
                    target: target as StateId,
                };
                if !arcs.contains(&arc) {
                    arcs.push(arc);
                }
            }
            states.push(DfaState {
                arcs,
                accepting: state.accepting,
            });
        }

        let mut first = FirstSet::new();
        for &label in &firsts[rule] {
            first.insert(self.make_label(label)?);
        }

        let symbol = self.tables.symbols[name];
        self.tables.dfas.push(ParserDfa {
            symbol,
            states,
            first,
        });
        Ok(())
    }

    fn next_label(&mut self, target: LabelTarget) -> Result<LabelId, GrammarError> {
        let index = self.tables.labels.len();
        let label = LabelId::try_from(index).map_err(|_| GrammarError::TooManyLabels)?;
        self.tables.labels.push(target);
        Ok(label)
    }

    fn make_label(&mut self, raw: RawLabel) -> Result<LabelId, GrammarError> {
        let (grammar, firsts) = (self.grammar, self.firsts);
        let text = grammar.label_text(raw);
        if is_quoted(text) {
            return self.literal_label(unquote(text));
        }

        if let Some(&symbol) = self.tables.symbols.get(text) {
            if let Some(&label) = self.symbol_labels.get(&symbol) {
                return Ok(label);
            }
            let label = self.next_label(LabelTarget::Symbol(symbol))?;
            self.symbol_labels.insert(symbol, label);

            // A rule that can only start with one literal is reported as
            // that literal when it is the only way forward.
            if let Some(rule) = grammar.rule_index(raw)
                && firsts[rule].len() == 1
                && let Some(&only) = firsts[rule].first()
            {
                let first = grammar.label_text(only);
                if is_quoted(first) {
                    self.tables
                        .expected_strings
                        .entry(label)
                        .or_insert_with(|| unquote(first).to_owned());
                }
            }
            return Ok(label);
        }

        if is_all_caps(text) {
            let kind =
                TokenKind::from_name(text).ok_or_else(|| GrammarError::NoSuchToken(text.to_owned()))?;
            if let Some(&label) = self.tables.token_ids.get(&kind) {
                return Ok(label);
            }
            let label = self.next_label(LabelTarget::Token(kind))?;
            self.tables.token_ids.insert(kind, label);
            return Ok(label);
        }

        Err(GrammarError::NoSuchRule(text.to_owned()))
    }

    fn literal_label(&mut self, value: &str) -> Result<LabelId, GrammarError> {
        let label = if value.starts_with(|c: char| c.is_alphabetic()) {
            if let Some(&label) = self.tables.keyword_ids.get(value) {
                return Ok(label);
            }
            let label = self.next_label(LabelTarget::Keyword)?;
            self.tables.keyword_ids.insert(value.to_owned(), label);
            label
        } else {
            let kind = self
                .config
                .operator_kind(value)
                .ok_or_else(|| GrammarError::NoSuchOperator(value.to_owned()))?;
            if let Some(&label) = self.tables.token_ids.get(&kind) {
                return Ok(label);
            }
            let label = self.next_label(LabelTarget::Token(kind))?;
            self.tables.token_ids.insert(kind, label);
            label
        };
        self.tables.expected_strings.insert(label, value.to_owned());
        Ok(label)
    }
}
