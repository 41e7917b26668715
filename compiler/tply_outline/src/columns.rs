//! Column bookkeeping: indent levels and body redenting.
//!
//! Every blank counts as one column. Only the blanks that open a line count;
//! once a line has content, the column stays where that content started.

use tply_ir::{is_blank, BodyId, StmtKind, TemplateArena};

use crate::Layout;

/// Running column over a sequence of statements.
#[derive(Copy, Clone, Debug)]
struct Column {
    at_line_start: bool,
    col: u32,
}

impl Column {
    fn line_start() -> Self {
        Column {
            at_line_start: true,
            col: 0,
        }
    }

    fn step(&mut self, ch: char) {
        if ch == '\n' {
            self.at_line_start = true;
            self.col = 0;
        } else if is_blank(ch) && self.at_line_start {
            self.col += 1;
        } else {
            self.at_line_start = false;
        }
    }
}

/// Record the source column of every statement.
pub(crate) fn assign_indent_levels(arena: &TemplateArena, root: BodyId, layout: &mut Layout) {
    let mut column = Column::line_start();
    assign_in_body(arena, root, &mut column, layout);
}

fn assign_in_body(arena: &TemplateArena, body: BodyId, column: &mut Column, layout: &mut Layout) {
    for &stmt in arena.body(body) {
        layout.set_indent_level(stmt, column.col);
        match &arena.stmt(stmt).kind {
            StmtKind::Text(text) => text.chars().for_each(|ch| column.step(ch)),
            kind => {
                column.at_line_start = false;
                for inner in kind.bodies() {
                    assign_in_body(arena, inner, column, layout);
                }
            }
        }
    }
}

/// Shift each body of a wrapped block left so that its least indented line
/// sits at the block's own column. Inner blocks go first.
pub(crate) fn redent_bodies(arena: &mut TemplateArena, body: BodyId, layout: &Layout) {
    let stmts = arena.body(body).to_vec();
    for stmt in stmts {
        let kind = &arena.stmt(stmt).kind;
        let is_block = kind.is_block();
        let bodies = kind.bodies();
        for &inner in &bodies {
            redent_bodies(arena, inner, layout);
        }
        if !(is_block && layout.is_wrapped(stmt)) {
            continue;
        }
        let level = layout.indent_level(stmt);
        for inner in bodies {
            let Some(indent) = inner_indent(arena, inner) else {
                continue;
            };
            let amount = indent.saturating_sub(level);
            if amount > 0 {
                tracing::trace!(?stmt, amount, "redent body");
                dedent(arena, inner, amount, &mut Column::line_start());
            }
        }
    }
}

/// Smallest column at which any line of `body` (nested bodies included)
/// has content. `None` if the body has no content at all.
pub(crate) fn inner_indent(arena: &TemplateArena, body: BodyId) -> Option<u32> {
    let mut column = Column::line_start();
    let mut min = None;
    min_in_body(arena, body, &mut column, &mut min);
    match min {
        Some(min) => Some(min),
        None if column.at_line_start => None,
        None => Some(column.col),
    }
}

fn min_in_body(arena: &TemplateArena, body: BodyId, column: &mut Column, min: &mut Option<u32>) {
    for &stmt in arena.body(body) {
        match &arena.stmt(stmt).kind {
            StmtKind::Text(text) => {
                for ch in text.chars() {
                    let opens_content = column.at_line_start && ch != '\n' && !is_blank(ch);
                    if opens_content {
                        record(min, column.col);
                    }
                    column.step(ch);
                }
            }
            kind => {
                record(min, column.col);
                column.at_line_start = false;
                for inner in kind.bodies() {
                    min_in_body(arena, inner, column, min);
                }
            }
        }
    }
}

fn record(min: &mut Option<u32>, col: u32) {
    *min = Some(min.map_or(col, |m| m.min(col)));
}

/// Remove up to `amount` leading blanks from every line of `body`'s text,
/// nested bodies included.
fn dedent(arena: &mut TemplateArena, body: BodyId, amount: u32, column: &mut Column) {
    let stmts = arena.body(body).to_vec();
    for stmt in stmts {
        if let Some(text) = arena.text_mut(stmt) {
            let mut out = String::with_capacity(text.len());
            for ch in text.chars() {
                let drop = is_blank(ch) && column.at_line_start && column.col < amount;
                column.step(ch);
                if !drop {
                    out.push(ch);
                }
            }
            *text = out;
            continue;
        }
        column.at_line_start = false;
        for inner in arena.stmt(stmt).kind.bodies() {
            dedent(arena, inner, amount, column);
        }
    }
}

#[cfg(test)]
mod tests;
