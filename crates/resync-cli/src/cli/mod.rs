mod args;
mod commands;
mod dispatch;

#[cfg(test)]
mod dispatch_tests;

use std::io::{self, IsTerminal};

pub use commands::build_cli;
pub use dispatch::{CheckParams, TokensParams, TreeParams};

/// When diagnostics are rendered with ANSI colors (`--color`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    /// Resolve `Auto`: diagnostics go to stderr and reports to stdout, so
    /// both have to be terminals.
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal() && io::stderr().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}
