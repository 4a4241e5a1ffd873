use std::fmt::Write;
use std::path::PathBuf;

use resync_core::Token;
use resync_lib::{ParseOptions, tokenize_source};

use super::parse_common::load_source;

pub struct TokensArgs {
    pub source_path: PathBuf,
    pub json: bool,
}

pub fn run(args: TokensArgs) {
    let source = load_source(&args.source_path);
    let tokens = match tokenize_source(&source, &ParseOptions::default()) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if !args.json {
        print!("{}", dump_tokens(&tokens));
        return;
    }
    match serde_json::to_string_pretty(&tokens) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: JSON serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// One token per line: `line:column KIND "value"`.
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let position = format!("{}:{}", token.line, token.column);
        writeln!(out, "{:<8}{}", position, token).expect("String write never fails");
    }
    out
}
