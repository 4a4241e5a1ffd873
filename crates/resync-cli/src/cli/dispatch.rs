//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs populated from clap, ignoring hidden flags
//! - `from_matches()` extractors
//! - `Into<*Args>` impls bridging dispatch and command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use resync_lib::{Mode, ParseOptions};
use resync_vm::{RecoveryLimits, Verbosity};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::parse_common::ParseArgs;
use crate::commands::tokens::TokensArgs;
use crate::commands::tree::TreeArgs;

/// Parser and repair search flags shared by `check` and `tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseParams {
    pub mode: Mode,
    pub print_function: bool,
    pub no_recovery: bool,
    pub attempts: usize,
    pub verbose: u8,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            mode: parse_mode(m),
            print_function: m.get_flag("print_function"),
            no_recovery: m.get_flag("no_recovery"),
            attempts: m
                .get_one::<usize>("attempts")
                .copied()
                .unwrap_or_else(|| RecoveryLimits::default().get_attempts()),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        let options = ParseOptions::new()
            .mode(p.mode)
            .print_function(p.print_function)
            .recovery(!p.no_recovery)
            .limits(RecoveryLimits::new().attempts(p.attempts));
        let verbosity = match p.verbose {
            0 => None,
            1 => Some(Verbosity::Verbose),
            _ => Some(Verbosity::VeryVerbose),
        };
        Self { options, verbosity }
    }
}

pub struct CheckParams {
    pub source_path: PathBuf,
    pub color: ColorChoice,
    pub json: bool,
    pub parse: ParseParams,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            color: parse_color(m),
            json: m.get_flag("json"),
            parse: ParseParams::from_matches(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            color: p.color.enabled(),
            json: p.json,
            parse: p.parse.into(),
        }
    }
}

pub struct TokensParams {
    pub source_path: PathBuf,
    pub json: bool,
    // Note: color and the parse flags are accepted but not extracted
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            source_path: p.source_path,
            json: p.json,
        }
    }
}

pub struct TreeParams {
    pub source_path: PathBuf,
    pub color: ColorChoice,
    pub json: bool,
    pub parse: ParseParams,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            color: parse_color(m),
            json: m.get_flag("json"),
            parse: ParseParams::from_matches(m),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source_path: p.source_path,
            color: p.color.enabled(),
            json: p.json,
            parse: p.parse.into(),
        }
    }
}

fn source_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("source_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    m.get_one::<String>("color")
        .and_then(|name| ColorChoice::from_name(name))
        .unwrap_or_default()
}

fn parse_mode(m: &ArgMatches) -> Mode {
    m.get_one::<String>("mode")
        .and_then(|name| Mode::from_name(name))
        .unwrap_or_default()
}
