//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! Commands that ignore an argument still accept it, hidden from `--help`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Python source file (positional, "-" for stdin).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Python source file (use \"-\" for stdin)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Start rule (--mode).
pub fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .value_name("MODE")
        .default_value("exec")
        .value_parser(["exec", "eval", "single"])
        .help("Start rule: module (exec), expression (eval) or interactive statement (single)")
}

/// Parse `print` as a function (--print-function).
pub fn print_function_arg() -> Arg {
    Arg::new("print_function")
        .long("print-function")
        .action(ArgAction::SetTrue)
        .help("Parse print as a function, as if __future__.print_function were imported")
}

/// Stop at the first syntax error (--no-recovery).
pub fn no_recovery_arg() -> Arg {
    Arg::new("no_recovery")
        .long("no-recovery")
        .action(ArgAction::SetTrue)
        .help("Report only the first syntax error")
}

/// Repair search attempt cap (--attempts). Unset means the library default.
pub fn attempts_arg() -> Arg {
    Arg::new("attempts")
        .long("attempts")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Maximum repair candidates tried per syntax error")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Trace repairs to stderr (-v for candidates, -vv for every parser action)")
}

/// Output JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output JSON")
}
