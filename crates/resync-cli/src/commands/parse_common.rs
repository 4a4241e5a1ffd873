//! Shared logic for commands that read and parse a source file.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use resync_lib::{
    Error, ParseOptions, ParsedSource, parse_source, parse_tokens_with, tokenize_source,
};
use resync_vm::{PrintTracer, Verbosity};

/// Parser options plus the trace level requested with `-v`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseArgs {
    pub options: ParseOptions,
    pub verbosity: Option<Verbosity>,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
}

/// Read a source file, or stdin when `path` is "-".
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(SourceError::Stdin)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Like [`read_source`], exiting with a message on failure.
pub fn load_source(path: &Path) -> String {
    read_source(path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}

/// Parse `source`, writing the repair trace to stderr when one was requested.
pub fn parse(source: &str, args: &ParseArgs) -> resync_lib::Result<ParsedSource> {
    let Some(verbosity) = args.verbosity else {
        return parse_source(source, &args.options);
    };

    let tokens = tokenize_source(source, &args.options)?;
    let grammar = args.options.grammar_for(&tokens);
    let mut tracer = PrintTracer::new(grammar, verbosity);
    let result = parse_tokens_with(&tokens, grammar, &args.options, &mut tracer);
    tracer.print();
    result
}

/// Text reporting a failed parse, ending with a newline.
///
/// Colored output renders source snippets; plain output is the caret listing.
pub fn render_error(error: &Error, path: &Path, color: bool) -> String {
    let diagnostics = error.diagnostics();
    let mut out = if diagnostics.is_empty() {
        format!("error: {}", error)
    } else if color {
        let path = path.display().to_string();
        diagnostics.printer().path(&path).colored(true).render()
    } else {
        diagnostics.format_messages()
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }

    if let Error::RecoveryExhausted { attempts, .. } = error {
        out.push_str(&format!(
            "error: no recovery found after {} attempts\n",
            attempts
        ));
    }
    out
}
