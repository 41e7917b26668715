//! Flat storage for a parsed template.
//!
//! # Design
//!
//! Four tables, one per node family. Statement order inside a body is the
//! body's own list, so "previous sibling" is `body[i - 1]`. Statements are
//! never freed: removing one from a body only unlinks it, which keeps every
//! previously handed-out id (and any side table indexed by it) valid.

use crate::{BodyId, Expr, ExprId, ExprKind, Pattern, PatternId, PatternKind, Span, Stmt, StmtId, StmtKind};

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TemplateArena {
    stmts: Vec<Stmt>,
    exprs: Vec<Expr>,
    patterns: Vec<Pattern>,
    bodies: Vec<Vec<StmtId>>,
}

impl TemplateArena {
    pub fn new() -> Self {
        Self::default()
    }

    // Allocation

    pub fn alloc_body(&mut self) -> BodyId {
        let id = BodyId::from_len(self.bodies.len());
        self.bodies.push(Vec::new());
        id
    }

    /// Append a statement to the end of `parent`.
    pub fn push_stmt(&mut self, parent: BodyId, kind: StmtKind, span: Span) -> StmtId {
        let id = StmtId::from_len(self.stmts.len());
        self.stmts.push(Stmt { kind, span, parent });
        self.bodies[parent.index()].push(id);
        id
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId::from_len(self.exprs.len());
        self.exprs.push(Expr { kind, span });
        id
    }

    pub fn alloc_pattern(&mut self, kind: PatternKind, span: Span) -> PatternId {
        let id = PatternId::from_len(self.patterns.len());
        self.patterns.push(Pattern { kind, span });
        id
    }

    // Access

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn pattern(&self, id: PatternId) -> &Pattern {
        &self.patterns[id.index()]
    }

    #[inline]
    pub fn body(&self, id: BodyId) -> &[StmtId] {
        &self.bodies[id.index()]
    }

    /// Number of statement slots, including unlinked ones. Side tables indexed
    /// by [`StmtId`] use this as their length.
    pub fn stmt_capacity(&self) -> usize {
        self.stmts.len()
    }

    /// Text payload of a text statement.
    pub fn text(&self, id: StmtId) -> Option<&str> {
        self.stmt(id).kind.as_text()
    }

    // Sibling queries

    /// Position of `id` within its parent body, if still linked.
    pub fn position(&self, id: StmtId) -> Option<usize> {
        let parent = self.stmt(id).parent;
        self.body(parent).iter().position(|&s| s == id)
    }

    pub fn prev_sibling(&self, id: StmtId) -> Option<StmtId> {
        let parent = self.stmt(id).parent;
        let pos = self.position(id)?;
        pos.checked_sub(1).map(|prev| self.body(parent)[prev])
    }

    pub fn next_sibling(&self, id: StmtId) -> Option<StmtId> {
        let parent = self.stmt(id).parent;
        let pos = self.position(id)?;
        self.body(parent).get(pos + 1).copied()
    }

    pub fn first_child(&self, body: BodyId) -> Option<StmtId> {
        self.body(body).first().copied()
    }

    pub fn last_child(&self, body: BodyId) -> Option<StmtId> {
        self.body(body).last().copied()
    }

    // Mutation, used by the outliner before the template is frozen.

    pub fn text_mut(&mut self, id: StmtId) -> Option<&mut String> {
        match &mut self.stmts[id.index()].kind {
            StmtKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Unlink `id` from its parent body. Returns the position it occupied.
    pub fn unlink(&mut self, id: StmtId) -> Option<usize> {
        let pos = self.position(id)?;
        let parent = self.stmt(id).parent;
        self.bodies[parent.index()].remove(pos);
        Some(pos)
    }

    /// Fold each run of adjacent text statements in `body` into its first member.
    pub fn merge_adjacent_text(&mut self, body: BodyId) {
        let mut i = 1;
        while i < self.bodies[body.index()].len() {
            let prev = self.bodies[body.index()][i - 1];
            let curr = self.bodies[body.index()][i];
            match (&self.stmts[prev.index()].kind, &self.stmts[curr.index()].kind) {
                (StmtKind::Text(_), StmtKind::Text(tail)) => {
                    let tail = tail.clone();
                    let tail_span = self.stmts[curr.index()].span;
                    let head = &mut self.stmts[prev.index()];
                    if let StmtKind::Text(text) = &mut head.kind {
                        text.push_str(&tail);
                    }
                    head.span = head.span.merge(tail_span);
                    self.bodies[body.index()].remove(i);
                }
                _ => i += 1,
            }
        }
    }
}
