//! Shared data structures for the tply template compiler.
//!
//! Everything the later phases exchange lives here:
//!
//! - [`Span`] and [`SourceFile`]: byte ranges and their line/column resolution
//! - [`Token`], [`TokenKind`], [`TokenTag`]: lexer output
//! - [`TemplateArena`] and the node types in [`ast`]: the parsed template
//!
//! # Design
//!
//! The AST is a flat arena indexed by `u32` ids. Bodies keep their statements
//! in an ordered list, and each statement records the body that owns it, so
//! sibling queries made by the outliner are lookups and the tree has no
//! back-pointers.

pub mod arena;
pub mod ast;
mod ids;
mod source;
mod span;
mod template;
mod token;

pub use arena::TemplateArena;
pub use ast::{Expr, ExprKind, IfCase, Literal, Pattern, PatternKind, Stmt, StmtKind};
pub use ids::{BodyId, ExprId, PatternId, StmtId};
pub use source::{Position, SourceFile};
pub use span::{Span, SpanError};
pub use template::Template;
pub use token::{Token, TokenKind, TokenTag};

/// Horizontal whitespace recognised by indentation logic.
#[inline]
pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}
