use std::path::PathBuf;

use super::parse_common::{ParseArgs, load_source, parse, render_error};

pub struct TreeArgs {
    pub source_path: PathBuf,
    pub color: bool,
    pub json: bool,
    pub parse: ParseArgs,
}

pub fn run(args: TreeArgs) {
    let source = load_source(&args.source_path);
    let parsed = match parse(&source, &args.parse) {
        Ok(parsed) => parsed,
        Err(error) => {
            eprint!("{}", render_error(&error, &args.source_path, args.color));
            std::process::exit(1);
        }
    };

    if !args.json {
        print!("{}", parsed.dump());
        return;
    }
    match serde_json::to_string_pretty(&parsed.tree.view(parsed.grammar)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: JSON serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}
