//! Plain-text rendering with a source snippet.
//!
//! ```text
//! error[E2001]: variable 'x' is not defined
//!  --> page.tply:2:4
//!   |
//! 2 | a {{x}}
//!   |     ^ not found in this scope
//! ```

use std::fmt::Write;

use tply_ir::SourceFile;

use crate::Diagnostic;

/// Render a diagnostic against the source it refers to.
pub fn render(diagnostic: &Diagnostic, source: &SourceFile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "error[{}]: {}", diagnostic.code, diagnostic.message);

    if let Some(label) = diagnostic.labels.first() {
        let start = source.position(label.span.start);
        let end = source.position(label.span.end.max(label.span.start));
        let gutter = start.line.to_string().len();
        let pad = " ".repeat(gutter);
        let _ = writeln!(out, "{pad}--> {}:{start}", source.name());

        if let Some(line) = source.line_text(start.line) {
            let _ = writeln!(out, "{pad} |");
            let _ = writeln!(out, "{} | {line}", start.line);

            let line_width = line.chars().count();
            let first = (start.column as usize).saturating_sub(1);
            let last = if end.line == start.line {
                (end.column as usize).saturating_sub(1)
            } else {
                line_width
            };
            let width = last.saturating_sub(first).max(1);
            let _ = write!(out, "{pad} | {}{}", " ".repeat(first), "^".repeat(width));
            if label.message.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, " {}", label.message);
            }
        }
    }

    for note in &diagnostic.notes {
        let _ = writeln!(out, "  = note: {note}");
    }
    out
}
