use resync_lib::{ParseOptions, tokenize_source};

use super::tokens::dump_tokens;

#[test]
fn one_token_per_line() {
    let tokens = tokenize_source("x = 1\n", &ParseOptions::default()).unwrap();

    insta::assert_snapshot!(dump_tokens(&tokens), @r#"
    1:0     NAME "x"
    1:2     EQUAL "="
    1:4     NUMBER "1"
    1:5     NEWLINE
    2:0     NEWLINE
    2:0     ENDMARKER
    "#);
}

#[test]
fn json_skips_source_line() {
    let tokens = tokenize_source("x\n", &ParseOptions::default()).unwrap();
    let json = serde_json::to_value(&tokens[0]).unwrap();

    assert_eq!(json["value"], "x");
    assert_eq!(json["line"], 1);
    assert!(json.get("source_line").is_none());
}
