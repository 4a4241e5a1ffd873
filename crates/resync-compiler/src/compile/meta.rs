//! Recursive-descent reader for grammar sources.
//!
//! ```text
//! rule         := NAME ':' alternatives NEWLINE
//! alternatives := items ('|' items)*
//! items        := item+
//! item         := '[' alternatives ']' | atom ['+' | '*']
//! atom         := '(' alternatives ')' | NAME | STRING
//! ```
//!
//! Each rule is turned into an NFA as it is read, then into a simplified DFA.

use indexmap::{IndexMap, IndexSet};
use resync_core::{Token, TokenKind};

use super::GrammarError;
use super::dfa::RawDfa;
use super::nfa::{Nfa, NfaStateId, RawLabel};
use crate::lexer::{LexOptions, tokenize};

/// Rules in declaration order, with their DFAs over raw labels.
#[derive(Debug)]
pub(crate) struct ParsedGrammar {
    pub(crate) labels: IndexSet<String>,
    pub(crate) rules: IndexMap<String, RawDfa>,
}

impl ParsedGrammar {
    pub(crate) fn label_text(&self, label: RawLabel) -> &str {
        &self.labels[label]
    }

    /// Rule referenced by a raw label, if the label names one.
    pub(crate) fn rule_index(&self, label: RawLabel) -> Option<usize> {
        self.rules.get_index_of(self.label_text(label))
    }

    pub(crate) fn rule_name(&self, rule: usize) -> &str {
        self.rules
            .get_index(rule)
            .map_or("", |(name, _)| name.as_str())
    }
}

pub(crate) fn parse(source: &str) -> Result<ParsedGrammar, GrammarError> {
    let tokens: Vec<Token> = tokenize(source.as_bytes(), LexOptions::default())?
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Nl | TokenKind::Comment))
        .collect();

    let mut reader = MetaParser {
        tokens,
        pos: 0,
        labels: IndexSet::new(),
        nfa: Nfa::new(),
    };
    let mut rules = IndexMap::new();

    loop {
        while reader.at(TokenKind::Newline) {
            reader.advance();
        }
        if reader.at(TokenKind::EndMarker) {
            break;
        }
        let (name, dfa) = reader.rule()?;
        if rules.contains_key(&name) {
            return Err(GrammarError::DuplicateRule(name));
        }
        rules.insert(name, dfa);
    }

    if rules.is_empty() {
        return Err(GrammarError::Empty);
    }
    Ok(ParsedGrammar {
        labels: reader.labels,
        rules,
    })
}

struct MetaParser {
    /// Always ends with ENDMARKER.
    tokens: Vec<Token>,
    pos: usize,
    labels: IndexSet<String>,
    nfa: Nfa,
}

impl MetaParser {
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<String, GrammarError> {
        let token = self.current();
        if token.kind != kind {
            return Err(GrammarError::Expected {
                expected: kind,
                found: token.kind,
                line: token.line,
            });
        }
        let value = token.value.clone();
        self.advance();
        Ok(value)
    }

    fn rule(&mut self) -> Result<(String, RawDfa), GrammarError> {
        let name = self.expect(TokenKind::Name)?;
        self.expect(TokenKind::Colon)?;
        let (start, end) = self.alternatives()?;
        self.expect(TokenKind::Newline)?;

        let nfa = std::mem::take(&mut self.nfa);
        let mut dfa = RawDfa::from_nfa(&nfa, start, end);
        dfa.simplify();
        Ok((name, dfa))
    }

    fn alternatives(&mut self) -> Result<(NfaStateId, NfaStateId), GrammarError> {
        let (first, last) = self.items()?;
        if !self.at(TokenKind::VBar) {
            return Ok((first, last));
        }

        let start = self.nfa.add_state();
        let end = self.nfa.add_state();
        self.nfa.epsilon(start, first);
        self.nfa.epsilon(last, end);
        while self.at(TokenKind::VBar) {
            self.advance();
            let (first, last) = self.items()?;
            self.nfa.epsilon(start, first);
            self.nfa.epsilon(last, end);
        }
        Ok((start, end))
    }

    fn items(&mut self) -> Result<(NfaStateId, NfaStateId), GrammarError> {
        let (start, mut end) = self.item()?;
        while matches!(
            self.current().kind,
            TokenKind::String | TokenKind::Name | TokenKind::LPar | TokenKind::LSqb
        ) {
            let (next, next_end) = self.item()?;
            self.nfa.epsilon(end, next);
            end = next_end;
        }
        Ok((start, end))
    }

    fn item(&mut self) -> Result<(NfaStateId, NfaStateId), GrammarError> {
        if self.at(TokenKind::LSqb) {
            self.advance();
            let (start, end) = self.alternatives()?;
            self.expect(TokenKind::RSqb)?;
            self.nfa.epsilon(start, end);
            return Ok((start, end));
        }

        let (start, end) = self.atom()?;
        match self.current().kind {
            TokenKind::Plus => {
                self.advance();
                self.nfa.epsilon(end, start);
                Ok((start, end))
            }
            TokenKind::Star => {
                self.advance();
                self.nfa.epsilon(end, start);
                Ok((start, start))
            }
            _ => Ok((start, end)),
        }
    }

    fn atom(&mut self) -> Result<(NfaStateId, NfaStateId), GrammarError> {
        let (kind, line) = (self.current().kind, self.current().line);
        match kind {
            TokenKind::LPar => {
                self.advance();
                let states = self.alternatives()?;
                self.expect(TokenKind::RPar)?;
                Ok(states)
            }
            TokenKind::Name | TokenKind::String => {
                let value = self.current().value.clone();
                let (label, _) = self.labels.insert_full(value);
                let start = self.nfa.add_state();
                let end = self.nfa.add_state();
                self.nfa.arc(start, end, label);
                self.advance();
                Ok((start, end))
            }
            kind => Err(GrammarError::UnexpectedToken { kind, line }),
        }
    }
}
