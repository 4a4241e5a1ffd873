//! `from __future__ import ...` detection.
//!
//! Future imports have to come first in a module: only blank lines, comments
//! and a docstring may precede them. The scan stops at the first token that
//! does not fit that prologue.

use resync_core::{Token, TokenKind};

/// Whether the module prologue turns `print` into a function.
pub fn imports_print_function(tokens: &[Token]) -> bool {
    future_features(tokens)
        .iter()
        .any(|feature| feature == "print_function")
}

/// Feature names imported from `__future__` by the module prologue, in order.
pub fn future_features(tokens: &[Token]) -> Vec<String> {
    let mut scan = Scan { tokens, pos: 0 };
    let mut features = Vec::new();

    scan.skip_newlines();
    if scan.eat(TokenKind::String) {
        while scan.eat(TokenKind::String) {}
        if !scan.eat(TokenKind::Newline) {
            return features;
        }
        scan.skip_newlines();
    }

    while scan.eat_name("from") && scan.eat_name("__future__") && scan.eat_name("import") {
        let parenthesized = scan.eat(TokenKind::LPar);
        while let Some(feature) = scan.name() {
            features.push(feature.to_owned());
            if scan.eat_name("as") && scan.name().is_none() {
                return features;
            }
            if !scan.eat(TokenKind::Comma) {
                break;
            }
        }
        if parenthesized && !scan.eat(TokenKind::RPar) {
            break;
        }
        if !scan.eat(TokenKind::Semi) && !scan.eat(TokenKind::Newline) {
            break;
        }
        scan.skip_newlines();
    }
    features
}

struct Scan<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Scan<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn eat_name(&mut self, value: &str) -> bool {
        if self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Name && t.value == value)
        {
            self.pos += 1;
            return true;
        }
        false
    }

    fn name(&mut self) -> Option<&'t str> {
        let token = self.peek().filter(|t| t.kind == TokenKind::Name)?;
        self.pos += 1;
        Some(&token.value)
    }

    fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Newline) {}
    }
}
