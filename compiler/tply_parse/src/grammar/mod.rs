//! Grammar productions, split by node family.

mod expr;
mod pattern;
pub(crate) mod script;
mod stmt;
