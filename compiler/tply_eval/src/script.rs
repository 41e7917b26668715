//! Script blocks (`{! ... !}`).
//!
//! The interpreter does not know what a script means. It hands the payload
//! to a [`ScriptEvaluator`] together with a fresh scope, then copies every
//! binding the script made into the scope the block appears in.

use crate::environment::Env;
use crate::errors::{script_failed, EvalError};
use crate::expr::{bind_pattern, eval_expr};

pub trait ScriptEvaluator: Send + Sync {
    /// Run `source`, defining new bindings in `scope`. `offset` is where
    /// `source` starts in the template, for error spans.
    fn execute(&self, source: &str, offset: u32, scope: &Env) -> Result<(), EvalError>;
}

/// Runs scripts made of `target = expression` lines using the template
/// expression grammar.
#[derive(Copy, Clone, Debug, Default)]
pub struct AssignmentScript;

impl ScriptEvaluator for AssignmentScript {
    fn execute(&self, source: &str, offset: u32, scope: &Env) -> Result<(), EvalError> {
        let program = tply_parse::parse_script(source, offset)
            .map_err(|error| script_failed(error.to_string()).with_span(error.span))?;
        for statement in &program.statements {
            let value = eval_expr(&program.arena, statement.value, scope)?;
            if let Some(target) = statement.target {
                bind_pattern(&program.arena, target, value, scope)?;
            }
        }
        tracing::trace!(statements = program.statements.len(), "ran script");
        Ok(())
    }
}

/// Rejects every script block.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoScripts;

impl ScriptEvaluator for NoScripts {
    fn execute(&self, _source: &str, _offset: u32, _scope: &Env) -> Result<(), EvalError> {
        Err(script_failed("script blocks are disabled"))
    }
}
