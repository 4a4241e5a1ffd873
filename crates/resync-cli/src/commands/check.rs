use std::path::PathBuf;

use resync_lib::{Diagnostics, Error};
use serde::Serialize;

use super::parse_common::{ParseArgs, load_source, parse, render_error};

pub struct CheckArgs {
    pub source_path: PathBuf,
    pub color: bool,
    pub json: bool,
    pub parse: ParseArgs,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub path: String,
    pub valid: bool,
    pub errors: Diagnostics,
}

impl CheckReport {
    pub fn new(path: &std::path::Path, result: Result<(), &Error>) -> Self {
        let errors = result.err().map(Error::diagnostics).unwrap_or_default();
        Self {
            path: path.display().to_string(),
            valid: result.is_ok(),
            errors,
        }
    }
}

pub fn run(args: CheckArgs) {
    let source = load_source(&args.source_path);
    let result = parse(&source, &args.parse);

    if args.json {
        let report = CheckReport::new(&args.source_path, result.as_ref().map(|_| ()));
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: JSON serialization failed: {}", e);
                std::process::exit(1);
            }
        }
        if !report.valid {
            std::process::exit(1);
        }
        return;
    }

    if let Err(error) = result {
        eprint!("{}", render_error(&error, &args.source_path, args.color));
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
