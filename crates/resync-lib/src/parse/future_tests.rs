use indoc::indoc;

use super::{ParseOptions, future_features, imports_print_function, tokenize_source};

fn features(source: &str) -> Vec<String> {
    let tokens = tokenize_source(source, &ParseOptions::default()).unwrap();
    future_features(&tokens)
}

#[test]
fn after_docstring() {
    let source = "\"Docstring\\\" \"\nfrom  __future__ import division\n";
    assert_eq!(features(source), ["division"]);
}

#[test]
fn comments_and_blank_lines_only() {
    assert!(features("# A comment about nothing ;\n").is_empty());
    assert!(features(" \t   \x0c \n   \n").is_empty());
}

#[test]
fn triple_quoted_docstring_alone() {
    let source = indoc! {r#"
        """ This is a
        docstring with line
        breaks in it. \"""It even has an escaped quote!"""
    "#};
    assert!(features(source).is_empty());
}

#[test]
fn several_names_and_aliases() {
    assert_eq!(
        features("from  __future__ import division, generators, with_statement\n"),
        ["division", "generators", "with_statement"]
    );
    assert_eq!(features("from  __future__ import division as b\n"), ["division"]);
    assert_eq!(
        features("from __future__ import (division,\n    print_function,)\n"),
        ["division", "print_function"]
    );
}

#[test]
fn several_statements() {
    let source = indoc! {"
        from __future__ import division; from __future__ import generators

        from __future__ import print_function
        import os
        from __future__ import absolute_import
    "};
    assert_eq!(features(source), ["division", "generators", "print_function"]);
}

#[test]
fn stops_at_other_code() {
    let source = indoc! {"
        x = 1
        from __future__ import print_function
    "};
    assert!(features(source).is_empty());
}

#[test]
fn print_function_switch() {
    let on = tokenize_source(
        "from __future__ import print_function\n",
        &ParseOptions::default(),
    )
    .unwrap();
    let off = tokenize_source("from __future__ import division\n", &ParseOptions::default()).unwrap();

    assert!(imports_print_function(&on));
    assert!(!imports_print_function(&off));
}
