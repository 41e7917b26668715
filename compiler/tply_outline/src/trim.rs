//! Removal of the whitespace that only serves to lay out wrapped tags.

use tply_ir::{BodyId, StmtKind, TemplateArena};

use crate::siblings::{strip_leading_newline, strip_trailing_blanks};
use crate::Layout;

/// Drop the blanks in front of every tag of a wrapped statement: the opening
/// tag and each closing (or case) tag ending one of its bodies.
pub(crate) fn undent_tags(arena: &mut TemplateArena, body: BodyId, layout: &Layout) {
    let stmts = arena.body(body).to_vec();
    for (pos, stmt) in stmts.into_iter().enumerate() {
        let bodies = arena.stmt(stmt).kind.bodies();
        if layout.is_wrapped(stmt) {
            strip_trailing_blanks(arena, body, pos);
            for &inner in &bodies {
                let len = arena.body(inner).len();
                strip_trailing_blanks(arena, inner, len);
            }
        }
        for inner in bodies {
            undent_tags(arena, inner, layout);
        }
    }
}

/// Drop the newline that ends each line holding a wrapped tag. A script
/// block always swallows the newline after it.
pub(crate) fn remove_scaffolding(arena: &mut TemplateArena, body: BodyId, layout: &Layout) {
    let stmts = arena.body(body).to_vec();
    for (pos, stmt) in stmts.into_iter().enumerate() {
        let kind = &arena.stmt(stmt).kind;
        let is_script = matches!(kind, StmtKind::Script(_));
        let bodies = kind.bodies();

        for &inner in &bodies {
            remove_scaffolding(arena, inner, layout);
        }

        if layout.is_wrapped(stmt) {
            for &inner in &bodies {
                strip_leading_newline(arena, inner, 0);
            }
            strip_leading_newline(arena, body, pos + 1);
        } else if is_script {
            strip_leading_newline(arena, body, pos + 1);
        }
    }
}
