//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Shared flags: every command accepts the parse flags
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use resync_lib::Mode;
use resync_vm::{RecoveryLimits, Verbosity};

use super::dispatch::ParseParams;
use super::*;
use crate::cli::commands::{check_command, tokens_command, tree_command};
use crate::commands::parse_common::ParseArgs;

#[test]
fn check_defaults() {
    let m = check_command()
        .try_get_matches_from(["check", "app.py"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.source_path, PathBuf::from("app.py"));
    assert_eq!(params.color, ColorChoice::Auto);
    assert!(!params.json);
    assert_eq!(
        params.parse,
        ParseParams {
            mode: Mode::Exec,
            print_function: false,
            no_recovery: false,
            attempts: RecoveryLimits::default().get_attempts(),
            verbose: 0,
        }
    );
}

#[test]
fn check_extracts_parse_flags() {
    let m = check_command()
        .try_get_matches_from([
            "check",
            "app.py",
            "--mode",
            "single",
            "--print-function",
            "--no-recovery",
            "--attempts",
            "50",
            "-vv",
            "--color",
            "never",
        ])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.color, ColorChoice::Never);
    assert_eq!(params.parse.mode, Mode::Single);
    assert!(params.parse.print_function);
    assert!(params.parse.no_recovery);
    assert_eq!(params.parse.attempts, 50);
    assert_eq!(params.parse.verbose, 2);
}

#[test]
fn parse_params_to_options() {
    let m = tree_command()
        .try_get_matches_from(["tree", "app.py", "--mode", "eval", "--attempts", "7", "-v"])
        .unwrap();
    let args: ParseArgs = TreeParams::from_matches(&m).parse.into();

    assert_eq!(args.options.get_mode(), Mode::Eval);
    assert!(args.options.get_recovery());
    assert_eq!(args.options.get_limits().get_attempts(), 7);
    assert_eq!(args.verbosity, Some(Verbosity::Verbose));
}

#[test]
fn no_recovery_disables_search() {
    let m = check_command()
        .try_get_matches_from(["check", "app.py", "--no-recovery"])
        .unwrap();
    let args: ParseArgs = CheckParams::from_matches(&m).parse.into();

    assert!(!args.options.get_recovery());
    assert_eq!(args.verbosity, None);
}

#[test]
fn tokens_accepts_parse_flags() {
    let result = tokens_command().try_get_matches_from([
        "tokens",
        "app.py",
        "--mode",
        "eval",
        "--no-recovery",
        "-v",
        "--color",
        "always",
    ]);
    assert!(
        result.is_ok(),
        "tokens should accept parse flags: {:?}",
        result.err()
    );

    let params = TokensParams::from_matches(&result.unwrap());
    assert_eq!(params.source_path, PathBuf::from("app.py"));
    assert!(!params.json);
}

#[test]
fn tokens_help_hides_parse_flags() {
    let help = tokens_command().render_help().to_string();

    assert!(help.contains("--json"));
    assert!(!help.contains("--mode"));
    assert!(!help.contains("--no-recovery"));
    assert!(!help.contains("--color"));
}

#[test]
fn check_help_shows_parse_flags() {
    let help = check_command().render_help().to_string();

    assert!(help.contains("--mode"));
    assert!(help.contains("--print-function"));
    assert!(help.contains("--attempts"));
}

#[test]
fn source_is_required() {
    assert!(check_command().try_get_matches_from(["check"]).is_err());
    assert!(tree_command().try_get_matches_from(["tree"]).is_err());
}

#[test]
fn rejects_unknown_mode() {
    let result = check_command().try_get_matches_from(["check", "app.py", "--mode", "repl"]);
    assert!(result.is_err());
}

#[test]
fn stdin_source() {
    let m = tree_command()
        .try_get_matches_from(["tree", "-", "--json"])
        .unwrap();
    let params = TreeParams::from_matches(&m);

    assert_eq!(params.source_path, PathBuf::from("-"));
    assert!(params.json);
}

#[test]
fn build_cli_has_all_commands() {
    let cli = build_cli();
    let names: Vec<_> = cli.get_subcommands().map(|c| c.get_name()).collect();
    assert_eq!(names, ["check", "tokens", "tree"]);
}

#[test]
fn attempts_default_comes_from_recovery_limits() {
    let m = tree_command()
        .try_get_matches_from(["tree", "app.py"])
        .unwrap();
    let args: ParseArgs = ParseParams::from_matches(&m).into();

    assert_eq!(
        args.options.get_limits().get_attempts(),
        RecoveryLimits::default().get_attempts()
    );
}

#[test]
fn color_names() {
    assert_eq!(ColorChoice::from_name("always"), Some(ColorChoice::Always));
    assert_eq!(ColorChoice::from_name("never"), Some(ColorChoice::Never));
    assert_eq!(ColorChoice::from_name("auto"), Some(ColorChoice::Auto));
    assert_eq!(ColorChoice::from_name("sometimes"), None);
    assert!(ColorChoice::Always.enabled());
    assert!(!ColorChoice::Never.enabled());
}
