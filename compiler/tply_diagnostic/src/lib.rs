//! Diagnostics shared by every tply phase.
//!
//! Phase errors stay as their own types (`LexError`, `ParseError`,
//! `EvalError`) and convert into a [`Diagnostic`] only when they are reported.

mod diagnostic;
mod error_code;
mod render;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use render::render;
