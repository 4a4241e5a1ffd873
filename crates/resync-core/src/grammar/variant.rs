use std::sync::Arc;

use super::{Grammar, GrammarConfig};

/// Builder for a grammar derived from an existing one.
///
/// Only the tables touched by an override are copied; everything else stays
/// shared with the base grammar.
pub struct GrammarVariant<'g> {
    base: &'g Grammar,
    removed_keywords: Vec<String>,
    config: Option<GrammarConfig>,
}

impl<'g> GrammarVariant<'g> {
    pub(super) fn new(base: &'g Grammar) -> Self {
        Self {
            base,
            removed_keywords: Vec::new(),
            config: None,
        }
    }

    /// Treat `keyword` as a plain token of the keyword kind.
    pub fn without_keyword(mut self, keyword: &str) -> Self {
        self.removed_keywords.push(keyword.to_owned());
        self
    }

    pub fn config(mut self, config: GrammarConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Grammar {
        let mut grammar = self.base.clone();
        if !self.removed_keywords.is_empty() {
            let keyword_ids = self
                .base
                .keyword_ids
                .iter()
                .filter(|(keyword, _)| !self.removed_keywords.contains(keyword))
                .map(|(keyword, &label)| (keyword.clone(), label))
                .collect();
            grammar.keyword_ids = Arc::new(keyword_ids);
        }
        if let Some(config) = self.config {
            grammar.config = Arc::new(config);
        }
        grammar
    }
}
