//! tply Eval - rendering of outlined templates.
//!
//! # Architecture
//!
//! - `Env`: lexical scopes over `Rc<RefCell<_>>`, with the builtins in a
//!   prelude scope at the root
//! - `eval_expr`: a tree walk over the expression arena; operators are
//!   ordinary functions bound in the prelude
//! - `render`: statement evaluation into a `LineBuffer`
//! - `ScriptEvaluator`: the seam for `{! ... !}` blocks
//!
//! Errors carry the span of the innermost expression or statement that
//! failed, see [`errors`].

mod builtins;
mod environment;
pub mod errors;
mod expr;
mod interpreter;
mod lines;
mod operators;
mod script;
mod value;

pub use environment::Env;
pub use errors::{EvalError, EvalErrorKind};
pub use expr::{bind_pattern, eval_expr};
pub use interpreter::{render, RenderConfig};
pub use lines::{Line, LineBuffer};
pub use script::{AssignmentScript, NoScripts, ScriptEvaluator};
pub use value::{Function, NativeFn, Value};
