//! Command builders for the CLI.
//!
//! Every command accepts the parse flags so that they can be swapped on the
//! same command line. `tokens` does not parse and hides them.

use clap::Command;

use super::args::*;

/// Add the flags controlling the parser and repair search.
fn with_parse_args(cmd: Command) -> Command {
    cmd.arg(mode_arg())
        .arg(print_function_arg())
        .arg(no_recovery_arg())
        .arg(attempts_arg())
        .arg(verbose_arg())
}

/// Add the parse flags hidden (for commands that don't parse).
fn with_hidden_parse_args(cmd: Command) -> Command {
    cmd.arg(mode_arg().hide(true))
        .arg(print_function_arg().hide(true))
        .arg(no_recovery_arg().hide(true))
        .arg(attempts_arg().hide(true))
        .arg(verbose_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("resync")
        .about("Python 2.7 syntax checker that reports several errors per pass")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(tokens_command())
        .subcommand(tree_command())
}

/// Report syntax errors of a source file.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Report syntax errors of a Python file")
        .after_help(
            r#"EXAMPLES:
  resync check app.py                    # all errors, later ones are guesses
  resync check app.py --no-recovery      # first error only
  resync check app.py --json             # machine-readable report
  resync check app.py -v                 # trace the repair search"#,
        )
        .arg(source_path_arg())
        .arg(color_arg())
        .arg(json_arg());

    with_parse_args(cmd)
}

/// Print the token stream of a source file.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Show the tokens of a Python file")
        .after_help(
            r#"EXAMPLES:
  resync tokens app.py
  resync tokens app.py --json
  echo 'x = 1' | resync tokens -"#,
        )
        .arg(source_path_arg())
        .arg(color_arg().hide(true))
        .arg(json_arg());

    with_hidden_parse_args(cmd)
}

/// Print the parse tree of a source file.
pub fn tree_command() -> Command {
    let cmd = Command::new("tree")
        .about("Show the parse tree of a Python file")
        .after_help(
            r#"EXAMPLES:
  resync tree app.py
  resync tree app.py --json
  resync tree expr.py --mode eval"#,
        )
        .arg(source_path_arg())
        .arg(color_arg())
        .arg(json_arg());

    with_parse_args(cmd)
}
