use indoc::indoc;

use super::*;

fn dump_with(source: &str, options: LexOptions) -> String {
    let tokens = tokenize(source.as_bytes(), options).unwrap();
    tokens
        .iter()
        .map(|t| format!("{t} {}:{}", t.line, t.column))
        .collect::<Vec<_>>()
        .join("\n")
}

fn dump(source: &str) -> String {
    dump_with(source, LexOptions::default())
}

fn error(source: &str) -> LexError {
    tokenize(source.as_bytes(), LexOptions::default()).unwrap_err()
}

#[test]
fn simple_expression() {
    insta::assert_snapshot!(dump("a+1"), @r#"
    NAME "a" 1:0
    PLUS "+" 1:1
    NUMBER "1" 1:2
    NEWLINE 2:0
    NEWLINE 2:0
    ENDMARKER 2:0
    "#);
}

#[test]
fn indent_and_dedent() {
    let source = indoc! {"
        if x:
            y
        z
    "};

    insta::assert_snapshot!(dump(source), @r#"
    NAME "if" 1:0
    NAME "x" 1:3
    COLON ":" 1:4
    NEWLINE 1:5
    INDENT "    " 2:0
    NAME "y" 2:4
    NEWLINE 2:5
    DEDENT 3:0
    NAME "z" 3:0
    NEWLINE 3:1
    NEWLINE 4:0
    ENDMARKER 4:0
    "#);
}

#[test]
fn tab_and_spaces_reach_same_column() {
    let source = "if x:\n\ty\n        z\n";

    insta::assert_snapshot!(dump(source), @r#"
    NAME "if" 1:0
    NAME "x" 1:3
    COLON ":" 1:4
    NEWLINE 1:5
    INDENT "\t" 2:0
    NAME "y" 2:1
    NEWLINE 2:2
    NAME "z" 3:8
    NEWLINE 3:9
    DEDENT 4:0
    NEWLINE 4:0
    ENDMARKER 4:0
    "#);
}

#[test]
fn open_blocks_closed_at_eof() {
    let source = "if x:\n    y";

    insta::assert_snapshot!(dump(source), @r#"
    NAME "if" 1:0
    NAME "x" 1:3
    COLON ":" 1:4
    NEWLINE 1:5
    INDENT "    " 2:0
    NAME "y" 2:4
    NEWLINE 3:0
    DEDENT 3:0
    NEWLINE 3:0
    ENDMARKER 3:0
    "#);

    insta::assert_snapshot!(dump_with(source, LexOptions::new().imply_dedent(false)), @r#"
    NAME "if" 1:0
    NAME "x" 1:3
    COLON ":" 1:4
    NEWLINE 1:5
    INDENT "    " 2:0
    NAME "y" 2:4
    NEWLINE 3:0
    ENDMARKER 3:0
    "#);
}

#[test]
fn comment_rides_on_newline() {
    insta::assert_snapshot!(dump("x = 1  # note\n"), @r##"
    NAME "x" 1:0
    EQUAL "=" 1:2
    NUMBER "1" 1:4
    NEWLINE "# note" 1:13
    NEWLINE 2:0
    ENDMARKER 2:0
    "##);
}

#[test]
fn brackets_suppress_newlines() {
    insta::assert_snapshot!(dump("(a,\n b)\n"), @r#"
    LPAR "(" 1:0
    NAME "a" 1:1
    COMMA "," 1:2
    NAME "b" 2:1
    RPAR ")" 2:2
    NEWLINE 2:3
    NEWLINE 3:0
    ENDMARKER 3:0
    "#);
}

#[test]
fn backslash_continues_line() {
    insta::assert_snapshot!(dump("x = 1 + \\\n    2\n"), @r#"
    NAME "x" 1:0
    EQUAL "=" 1:2
    NUMBER "1" 1:4
    PLUS "+" 1:6
    NUMBER "2" 2:4
    NEWLINE 2:5
    NEWLINE 3:0
    ENDMARKER 3:0
    "#);
}

#[test]
fn numbers() {
    insta::assert_snapshot!(dump("0x1F 3.14 1e10 .5 7L\n"), @r#"
    NUMBER "0x1F" 1:0
    NUMBER "3.14" 1:5
    NUMBER "1e10" 1:10
    NUMBER ".5" 1:15
    NUMBER "7L" 1:18
    NEWLINE 1:20
    NEWLINE 2:0
    ENDMARKER 2:0
    "#);
}

#[test]
fn prefixed_strings() {
    insta::assert_snapshot!(dump("b'x' ur\"y\"\n"), @r#"
    STRING "b'x'" 1:0
    STRING "ur\"y\"" 1:5
    NEWLINE 1:10
    NEWLINE 2:0
    ENDMARKER 2:0
    "#);
}

#[test]
fn triple_quoted_string_spans_lines() {
    insta::assert_snapshot!(dump("x = '''a\nb'''\n"), @r#"
    NAME "x" 1:0
    EQUAL "=" 1:2
    STRING "'''a\nb'''" 1:4
    NEWLINE 2:4
    NEWLINE 3:0
    ENDMARKER 3:0
    "#);
}

#[test]
fn backslash_continues_single_quoted_string() {
    insta::assert_snapshot!(dump("s = 'ab\\\ncd'\n"), @r#"
    NAME "s" 1:0
    EQUAL "=" 1:2
    STRING "'ab\\\ncd'" 1:4
    NEWLINE 2:3
    NEWLINE 3:0
    ENDMARKER 3:0
    "#);
}

#[test]
fn continued_string_left_open_is_error_token() {
    insta::assert_snapshot!(dump("s = 'ab\\\ncd\n"), @r#"
    NAME "s" 1:0
    EQUAL "=" 1:2
    ERRORTOKEN "'ab\\\ncd\n" 1:4
    NEWLINE 3:0
    NEWLINE 3:0
    ENDMARKER 3:0
    "#);
}

#[test]
fn diamond_is_not_equal() {
    let tokens = tokenize(b"a <> b\n", LexOptions::default()).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::NotEqual);
    assert_eq!(tokens[1].value, "<>");
}

#[test]
fn crlf_line_endings() {
    insta::assert_snapshot!(dump("a\r\nb\r\n"), @r#"
    NAME "a" 1:0
    NEWLINE 1:1
    NAME "b" 2:0
    NEWLINE 2:1
    NEWLINE 3:0
    ENDMARKER 3:0
    "#);
}

#[test]
fn unfinished_number_becomes_error_token() {
    insta::assert_snapshot!(dump("1e+x\n"), @r#"
    ERRORTOKEN "1" 1:0
    NAME "e" 1:1
    PLUS "+" 1:2
    NAME "x" 1:3
    NEWLINE 1:4
    NEWLINE 2:0
    ENDMARKER 2:0
    "#);
}

#[test]
fn tokens_keep_their_source_line() {
    let tokens = tokenize(b"a\n  \nb = 2\n", LexOptions::default()).unwrap();
    let b = tokens.iter().find(|t| t.value == "b").unwrap();

    assert_eq!(&*b.source_line, "b = 2\n");
    assert_eq!(b.line, 3);
}

#[test]
fn parenthesis_never_closed() {
    let err = error("foo(1,\n2\n");

    assert_eq!(err.kind, LexErrorKind::Token);
    assert_eq!(err.message, "parenthesis is never closed");
    assert_eq!((err.line, err.column), (1, 4));
    assert_eq!(&*err.source_line, "foo(1,\n");
}

#[test]
fn unmatched_closing_bracket() {
    let err = error("a)\n");

    assert_eq!(err.message, "unmatched ')'");
    assert_eq!((err.line, err.column), (1, 2));
}

#[test]
fn mismatched_bracket_names_opening_line() {
    let err = error("(a\n]\n");

    assert_eq!(
        err.message,
        "closing parenthesis ']' does not match opening parenthesis '(' on line 1"
    );
    assert_eq!((err.line, err.column), (2, 1));

    let err = error("(a]\n");
    assert_eq!(
        err.message,
        "closing parenthesis ']' does not match opening parenthesis '('"
    );
}

#[test]
fn bad_dedent() {
    let source = indoc! {"
        if x:
                a
            b
    "};
    let err = error(source);

    assert_eq!(err.kind, LexErrorKind::Indentation);
    assert_eq!(
        err.message,
        "unindent does not match any outer indentation level"
    );
    assert_eq!((err.line, err.column), (3, 5));
    insta::assert_snapshot!(
        err.to_string(),
        @"unindent does not match any outer indentation level (line 3, column 5)"
    );
}

#[test]
fn unterminated_triple_quote() {
    let err = error("s = '''abc\n");

    assert_eq!(
        err.message,
        "end of file (EOF) while scanning triple-quoted string literal"
    );
    assert_eq!((err.line, err.column), (1, 5));
}

#[test]
fn unterminated_single_quote() {
    let err = error("s = 'abc\n");

    assert_eq!(err.message, "end of line (EOL) while scanning string literal");
    assert_eq!((err.line, err.column), (1, 5));
}

#[test]
fn unknown_character() {
    let err = error("a $\n");

    assert_eq!(err.message, "Unknown character");
    assert_eq!((err.line, err.column), (1, 3));
}

#[test]
fn split_lines_keeps_terminators() {
    assert_eq!(
        split_lines(b"a\nb\r\nc\rd"),
        vec![&b"a\n"[..], b"b\r\n", b"c\r", b"d"]
    );
    assert!(split_lines(b"").is_empty());
}
