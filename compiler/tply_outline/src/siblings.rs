//! Newline checks and whitespace stripping across runs of text siblings.
//!
//! Positions are indices into a body. "Before `pos`" means the statements at
//! `..pos`, "from `pos`" means `pos..`. Each walk continues into the next
//! text sibling only while the current one is blank, and stops at the first
//! non-text statement.

use tply_ir::{is_blank, BodyId, TemplateArena};

/// Whether the text before `pos` ends at a line start, ignoring blanks.
/// Reaching the start of the body counts as `at_edge`.
pub(crate) fn newline_before(arena: &TemplateArena, body: BodyId, pos: usize, at_edge: bool) -> bool {
    for &stmt in arena.body(body)[..pos].iter().rev() {
        let Some(text) = arena.text(stmt) else {
            return false;
        };
        for ch in text.chars().rev() {
            if ch == '\n' {
                return true;
            }
            if !is_blank(ch) {
                return false;
            }
        }
    }
    at_edge
}

/// Whether the text from `pos` starts with a newline, ignoring blanks.
/// Reaching the end of the body counts as `at_edge`.
pub(crate) fn newline_after(arena: &TemplateArena, body: BodyId, pos: usize, at_edge: bool) -> bool {
    let stmts = arena.body(body);
    for &stmt in stmts.get(pos..).unwrap_or_default() {
        let Some(text) = arena.text(stmt) else {
            return false;
        };
        for ch in text.chars() {
            if ch == '\n' {
                return true;
            }
            if !is_blank(ch) {
                return false;
            }
        }
    }
    at_edge
}

/// Remove trailing blanks from the text before `pos`.
pub(crate) fn strip_trailing_blanks(arena: &mut TemplateArena, body: BodyId, pos: usize) {
    let stmts: Vec<_> = arena.body(body)[..pos].to_vec();
    for stmt in stmts.into_iter().rev() {
        let Some(text) = arena.text_mut(stmt) else {
            return;
        };
        let kept = text.trim_end_matches(is_blank).len();
        text.truncate(kept);
        if kept > 0 {
            return;
        }
    }
}

/// Remove leading blanks and at most one newline from the text from `pos`.
pub(crate) fn strip_leading_newline(arena: &mut TemplateArena, body: BodyId, pos: usize) {
    let stmts: Vec<_> = arena.body(body).get(pos..).unwrap_or_default().to_vec();
    for stmt in stmts {
        let Some(text) = arena.text_mut(stmt) else {
            return;
        };
        let mut cut = 0;
        let mut done = false;
        for (i, ch) in text.char_indices() {
            if ch == '\n' {
                cut = i + 1;
                done = true;
                break;
            }
            if !is_blank(ch) {
                cut = i;
                done = true;
                break;
            }
            cut = i + ch.len_utf8();
        }
        text.drain(..cut);
        if done {
            return;
        }
    }
}
