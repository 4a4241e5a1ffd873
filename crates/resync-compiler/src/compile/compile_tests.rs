use indoc::indoc;
use resync_core::{GrammarConfig, LabelTarget, TokenKind};

use super::*;

fn dump(source: &str) -> String {
    compile(source, GrammarConfig::default()).unwrap().dump()
}

fn error(source: &str) -> String {
    compile(source, GrammarConfig::default())
        .unwrap_err()
        .to_string()
}

#[test]
fn single_token_rule() {
    let grammar = compile("eval: NAME", GrammarConfig::default()).unwrap();

    assert_eq!(grammar.labels()[0], LabelTarget::Reserved);
    assert_eq!(grammar.labels()[1], LabelTarget::Token(TokenKind::Name));
    insta::assert_snapshot!(grammar.dump(), @r"
    start: eval
    eval = 256, first {NAME}
      s0: NAME -> s1
      s1 (final)
    ");
}

#[test]
fn one_or_more() {
    insta::assert_snapshot!(dump("foo: NAME+ 'end'"), @r"
    start: foo
    foo = 256, first {NAME}
      s0: NAME -> s1
      s1: NAME -> s1, 'end' -> s2
      s2 (final)
    ");
}

#[test]
fn zero_or_more_collapses_loop() {
    insta::assert_snapshot!(dump("r: NAME* ','"), @r"
    start: r
    r = 256, first {NAME, COMMA}
      s0: NAME -> s0, COMMA -> s1
      s1 (final)
    ");
}

#[test]
fn optional_item() {
    insta::assert_snapshot!(dump("r: [NAME] NUMBER"), @r"
    start: r
    r = 256, first {NAME, NUMBER}
      s0: NAME -> s1, NUMBER -> s2
      s1: NUMBER -> s2
      s2 (final)
    ");
}

#[test]
fn alternatives_share_final_state() {
    insta::assert_snapshot!(dump("r: 'a' | 'b'"), @r"
    start: r
    r = 256, first {'a', 'b'}
      s0: 'a' -> s1, 'b' -> s1
      s1 (final)
    ");
}

#[test]
fn start_rule_first_then_alphabetical() {
    let source = indoc! {"
        file: stmt+ ENDMARKER
        stmt: NAME '=' expr NEWLINE
        expr: NUMBER | NAME
    "};

    insta::assert_snapshot!(dump(source), @r"
    start: file
    file = 256, first {NAME}
      s0: stmt -> s1
      s1: stmt -> s1, ENDMARKER -> s2
      s2 (final)
    expr = 257, first {NAME, NUMBER}
      s0: NUMBER -> s1, NAME -> s1
      s1 (final)
    stmt = 258, first {NAME}
      s0: NAME -> s1
      s1: EQUAL -> s2
      s2: expr -> s3
      s3: NEWLINE -> s4
      s4 (final)
    ");
}

#[test]
fn one_dfa_per_rule() {
    let source = indoc! {"
        # comments and blank lines are ignored

        a: b c
        b: 'x' | 'y'
        c: (NAME | NUMBER) [',' c]
    "};
    let grammar = compile(source, GrammarConfig::default()).unwrap();

    assert_eq!(grammar.dfas().len(), 3);
    assert_eq!(grammar.start(), 256);
    assert_eq!(grammar.symbol_name(grammar.start()), Some("a"));
    for (index, dfa) in grammar.dfas().iter().enumerate() {
        assert_eq!(dfa.symbol, 256 + index as u16);
    }
}

#[test]
fn keywords_and_operators_share_label_space() {
    let source = indoc! {"
        r: 'if' NAME ':' 'if'
    "};
    let grammar = compile(source, GrammarConfig::default()).unwrap();

    assert_eq!(grammar.keyword_ids().get("if"), Some(&1));
    assert_eq!(grammar.token_ids().get(&TokenKind::Name), Some(&2));
    assert_eq!(grammar.token_ids().get(&TokenKind::Colon), Some(&3));
    assert_eq!(grammar.labels().len(), 4);
    assert_eq!(grammar.expected_str(1), Some("if"));
    assert_eq!(grammar.expected_str(2), None);
    assert_eq!(grammar.expected_str(3), Some(":"));
}

#[test]
fn symbol_with_single_literal_start_has_expected_string() {
    let source = indoc! {"
        r: block | NAME
        block: 'do' NAME 'end'
    "};
    let grammar = compile(source, GrammarConfig::default()).unwrap();

    let block = grammar.symbol_id("block").unwrap();
    let label = grammar
        .labels()
        .iter()
        .position(|&l| l == LabelTarget::Symbol(block))
        .unwrap() as u8;
    assert_eq!(grammar.expected_str(label), Some("do"));

    let r = grammar.dfa(grammar.start());
    assert!(r.first.contains(grammar.keyword_ids()["do"]));
    assert!(r.first.contains(grammar.token_ids()[&TokenKind::Name]));
}

#[test]
fn unknown_operator() {
    let config = GrammarConfig::new(TokenKind::Name).operator("+", TokenKind::Plus);
    let source = indoc! {"
        add: NUMBER '+' NUMBER
        div: NUMBER '/' NUMBER
    "};
    let err = compile(source, config).unwrap_err();

    assert_eq!(err, GrammarError::NoSuchOperator("/".to_owned()));
    assert_eq!(err.to_string(), "no such operator: /");
}

#[test]
fn meta_syntax_errors() {
    assert_eq!(
        error("foo NAME"),
        "expected token COLON but got NAME at line 1"
    );
    assert_eq!(error("foo:\n"), "unexpected token: NEWLINE at line 1");
    assert_eq!(
        error("foo: (NAME]\n"),
        "closing parenthesis ']' does not match opening parenthesis '(' (line 1, column 11)"
    );
}

#[test]
fn unresolved_references() {
    assert_eq!(error("r: missing"), "no such rule: missing");
    assert_eq!(error("r: BOGUS"), "no such token: BOGUS");
}

#[test]
fn left_recursion() {
    assert_eq!(error("expr: expr '+' NAME"), "recursion in rule: 'expr'");

    let indirect = indoc! {"
        a: b NAME
        b: a NUMBER
    "};
    assert_eq!(error(indirect), "recursion in rule: 'b'");
}

#[test]
fn ambiguous_start() {
    let source = indoc! {"
        r: a | b
        a: NAME
        b: NAME NUMBER
    "};

    assert_eq!(error(source), "ambiguous symbol with label b in rule 'r'");
}

#[test]
fn duplicate_and_empty() {
    assert_eq!(
        compile("r: NAME\nr: NUMBER\n", GrammarConfig::default()).unwrap_err(),
        GrammarError::DuplicateRule("r".to_owned())
    );
    assert_eq!(
        compile("# nothing here\n", GrammarConfig::default()).unwrap_err(),
        GrammarError::Empty
    );
}

#[test]
fn lexer_errors_pass_through() {
    let err = compile("r: (NAME", GrammarConfig::default()).unwrap_err();

    let GrammarError::Lex(lex) = err else {
        panic!("expected a lexer error, got {err:?}");
    };
    assert_eq!(lex.message, "parenthesis is never closed");
}
