//! Template AST node types.
//!
//! Nodes refer to each other through ids into the [`TemplateArena`](crate::TemplateArena).
//! Operators are not a separate node: `a + b` is a [`ExprKind::Call`] whose
//! callee is a [`ExprKind::VarRef`] named `+`.

use crate::{BodyId, ExprId, PatternId, Span};

/// Statement node. `parent` is the body that lists it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
    pub parent: BodyId,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum StmtKind {
    /// Literal template text.
    Text(String),
    /// `{# ... #}`. Removed by the outliner.
    Comment(String),
    /// `{{ expr }}`
    Expression(ExprId),
    /// `{% if %}` with its ordered cases; an untested case is last.
    If(Vec<IfCase>),
    /// `{% for pattern in iterable %}`
    For {
        pattern: PatternId,
        iterable: ExprId,
        body: BodyId,
    },
    /// `{% join pattern in iterable with separator %}`
    Join {
        pattern: PatternId,
        iterable: ExprId,
        separator: ExprId,
        body: BodyId,
    },
    /// `{% setindent level %}`, and `{% noindent %}` with a constant zero level.
    SetIndent { level: ExprId, body: BodyId },
    /// `{! ... !}`: opaque payload handed to the script evaluator.
    Script(String),
}

impl StmtKind {
    /// Bodies owned by this statement, in source order.
    pub fn bodies(&self) -> Vec<BodyId> {
        match self {
            StmtKind::If(cases) => cases.iter().map(|case| case.body).collect(),
            StmtKind::For { body, .. }
            | StmtKind::Join { body, .. }
            | StmtKind::SetIndent { body, .. } => vec![*body],
            StmtKind::Text(_)
            | StmtKind::Comment(_)
            | StmtKind::Expression(_)
            | StmtKind::Script(_) => Vec::new(),
        }
    }

    /// Whether this statement owns bodies of nested statements.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            StmtKind::If(_) | StmtKind::For { .. } | StmtKind::Join { .. } | StmtKind::SetIndent { .. }
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StmtKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One `if`/`elif`/`else` arm. `test` is `None` for `else`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IfCase {
    pub test: Option<ExprId>,
    pub body: BodyId,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Literal {
    Int(i64),
    Str(String),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    Const(Literal),
    VarRef(String),
    Index {
        target: ExprId,
        index: ExprId,
    },
    /// `target[low:high]`, either bound optional.
    Slice {
        target: ExprId,
        low: Option<ExprId>,
        high: Option<ExprId>,
    },
    /// `target.a.b.c` keeps the whole chain of names.
    Member {
        target: ExprId,
        names: Vec<String>,
    },
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    Tuple(Vec<ExprId>),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum PatternKind {
    Var(String),
    Tuple(Vec<PatternId>),
}
