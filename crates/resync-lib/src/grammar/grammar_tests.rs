use resync_core::{Token, TokenKind};

use super::*;

#[test]
fn bundled_grammar_compiles() {
    let grammar = python_grammar();

    assert_eq!(grammar.symbol_name(grammar.start()), Some("file_input"));
    assert!(grammar.symbol_id(INDENTED_BLOCK_RULE).is_some());
    assert!(grammar.symbol_id("fake_stmt").is_some());
    assert!(grammar.is_keyword("print"));
    assert!(grammar.is_keyword("lambda"));
}

#[test]
fn print_function_variant_drops_only_print() {
    let base = python_grammar();
    let variant = python_grammar_no_print();

    assert!(!variant.is_keyword("print"));
    assert!(variant.is_keyword("exec"));
    assert_eq!(variant.keyword_ids().len() + 1, base.keyword_ids().len());
    assert_eq!(variant.dfas().len(), base.dfas().len());

    let print = Token::synthetic(TokenKind::Name, "print");
    let name = Token::synthetic(TokenKind::Name, "x");
    assert_ne!(base.classify(&print), base.classify(&name));
    assert_eq!(variant.classify(&print), variant.classify(&name));
}

#[test]
fn grammar_for_picks_variant() {
    assert!(grammar_for(false).is_keyword("print"));
    assert!(!grammar_for(true).is_keyword("print"));
}

#[test]
fn modes_have_start_symbols() {
    let grammar = python_grammar();
    for mode in [Mode::Exec, Mode::Eval, Mode::Single] {
        let symbol = mode.start_symbol(grammar).unwrap();
        assert_eq!(grammar.symbol_name(symbol), Some(mode.start_rule()));
    }
    assert_eq!(Mode::from_name("eval"), Some(Mode::Eval));
    assert_eq!(Mode::from_name("module"), None);
    assert_eq!(Mode::default(), Mode::Exec);
}

#[test]
fn block_structure_is_protected() {
    let config = python_config();

    assert!(!config.can_delete(TokenKind::Newline));
    assert!(!config.can_delete(TokenKind::Dedent));
    assert!(config.can_delete(TokenKind::Colon));
    assert!(!config.can_insert(TokenKind::Indent));
    assert!(config.can_insert(TokenKind::Newline));

    let kinds: Vec<_> = python_grammar()
        .insertion_candidates()
        .iter()
        .map(|t| t.kind)
        .collect();
    assert!(kinds.contains(&TokenKind::FakeSuite));
    assert!(kinds.contains(&TokenKind::FakeSuiteStart));
    assert!(!kinds.contains(&TokenKind::Indent));
    assert!(!kinds.contains(&TokenKind::EndMarker));
}
