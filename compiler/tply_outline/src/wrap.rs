//! Wrapped/inline classification.

use tply_ir::{BodyId, StmtKind, TemplateArena};

use crate::siblings::{newline_after, newline_before};
use crate::Layout;

pub(crate) fn classify(arena: &TemplateArena, body: BodyId, layout: &mut Layout) {
    for (pos, &stmt) in arena.body(body).iter().enumerate() {
        let kind = &arena.stmt(stmt).kind;
        let wrapped = match kind {
            StmtKind::Script(_) => owns_line(arena, body, pos),
            kind if kind.is_block() => {
                owns_line(arena, body, pos)
                    && kind.bodies().into_iter().all(|inner| body_is_framed(arena, inner))
            }
            _ => false,
        };
        layout.set_wrapped(stmt, wrapped);

        for inner in kind.bodies() {
            classify(arena, inner, layout);
        }
    }
}

/// Nothing but blanks between the statement and the surrounding newlines.
fn owns_line(arena: &TemplateArena, body: BodyId, pos: usize) -> bool {
    newline_before(arena, body, pos, true) && newline_after(arena, body, pos + 1, true)
}

/// The body's content starts on the line after its opening tag and ends on
/// the line before its closing tag.
fn body_is_framed(arena: &TemplateArena, body: BodyId) -> bool {
    let len = arena.body(body).len();
    newline_after(arena, body, 0, true) && newline_before(arena, body, len, true)
}
