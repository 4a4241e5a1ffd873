//! Builder-pattern printer for rendering diagnostics with source snippets.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::{Diagnostics, SyntaxDiagnostic};

const GUESSES_NOTE: &str = "note: the errors below were found after repairing the one above, they may be guesses";

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 'p> {
    diagnostics: &'d Diagnostics,
    path: Option<&'p str>,
    colored: bool,
}

impl<'d, 'p> DiagnosticsPrinter<'d, 'p> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'p str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i == 1 {
                write!(w, "\n{GUESSES_NOTE}\n")?;
            }
            if i > 0 {
                w.write_char('\n')?;
            }
            let text = diag.text.trim_end_matches(['\r', '\n']);
            let title = format!("{}: {}", diag.kind.exception_name(), diag.message);

            let mut snippet = Snippet::source(text)
                .line_start(diag.line.max(1) as usize)
                .annotation(AnnotationKind::Primary.span(caret_range(diag, text)));
            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let level = if diag.guessed {
                Level::WARNING
            } else {
                Level::ERROR
            };
            let report: Vec<Group> = vec![level.primary_title(&title).element(snippet)];
            write!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }
}

/// Byte range under the caret, kept on a character boundary of `text`.
fn caret_range(diag: &SyntaxDiagnostic, text: &str) -> Range<usize> {
    let mut start = (diag.offset.saturating_sub(1) as usize).min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let end = text[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    start..end
}
