//! Comment removal.
//!
//! A comment alone on its line disappears together with its line: blanks
//! in front of it and the newline after it go too. Any other comment is
//! removed and its neighbours are left untouched.

use tply_ir::{BodyId, StmtKind, TemplateArena};

use crate::siblings::{newline_after, newline_before, strip_leading_newline, strip_trailing_blanks};

pub(crate) fn remove_comments(arena: &mut TemplateArena, root: BodyId) {
    remove_in_body(arena, root, true);
}

/// `at_edge` tells whether the start and end of `body` are line boundaries.
/// That holds for the file itself; a nested body starts right after a tag.
fn remove_in_body(arena: &mut TemplateArena, body: BodyId, at_edge: bool) {
    let nested: Vec<BodyId> = arena
        .body(body)
        .iter()
        .flat_map(|&stmt| arena.stmt(stmt).kind.bodies())
        .collect();
    for inner in nested {
        remove_in_body(arena, inner, false);
    }

    while let Some(comment) = arena
        .body(body)
        .iter()
        .copied()
        .find(|&stmt| matches!(arena.stmt(stmt).kind, StmtKind::Comment(_)))
    {
        let Some(pos) = arena.unlink(comment) else {
            break;
        };
        if newline_before(arena, body, pos, at_edge) && newline_after(arena, body, pos, at_edge) {
            strip_trailing_blanks(arena, body, pos);
            strip_leading_newline(arena, body, pos);
        }
    }
    arena.merge_adjacent_text(body);
}
