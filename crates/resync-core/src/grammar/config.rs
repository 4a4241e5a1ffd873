use indexmap::IndexMap;

use crate::token::{OPERATORS, TokenKind};

/// Per-language knobs that the grammar compiler and repair search consult.
///
/// `ENDMARKER` can never be deleted or inserted, whatever the sets say.
#[derive(Debug, Clone)]
pub struct GrammarConfig {
    keyword_kind: TokenKind,
    operators: IndexMap<String, TokenKind>,
    never_delete: Vec<TokenKind>,
    never_insert: Vec<TokenKind>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self::new(TokenKind::Name).with_standard_operators()
    }
}

impl GrammarConfig {
    /// Configuration with no operators and no protected kinds.
    pub fn new(keyword_kind: TokenKind) -> Self {
        Self {
            keyword_kind,
            operators: IndexMap::new(),
            never_delete: Vec::new(),
            never_insert: Vec::new(),
        }
    }

    /// Add every operator spelling the lexer knows.
    pub fn with_standard_operators(mut self) -> Self {
        for &(text, kind) in OPERATORS {
            self.operators.insert(text.to_owned(), kind);
        }
        self
    }

    /// Map an operator literal used in grammar sources to a token kind.
    pub fn operator(mut self, text: &str, kind: TokenKind) -> Self {
        self.operators.insert(text.to_owned(), kind);
        self
    }

    /// Kinds the repair search must never delete.
    pub fn never_delete(mut self, kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        self.never_delete.extend(kinds);
        self
    }

    /// Kinds the repair search must never insert.
    pub fn never_insert(mut self, kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        self.never_insert.extend(kinds);
        self
    }

    pub fn keyword_kind(&self) -> TokenKind {
        self.keyword_kind
    }

    pub fn operator_kind(&self, text: &str) -> Option<TokenKind> {
        self.operators.get(text).copied()
    }

    pub fn can_delete(&self, kind: TokenKind) -> bool {
        kind != TokenKind::EndMarker && !self.never_delete.contains(&kind)
    }

    pub fn can_insert(&self, kind: TokenKind) -> bool {
        kind != TokenKind::EndMarker && !self.never_insert.contains(&kind)
    }
}
