//! Expression evaluation and pattern binding.
//!
//! Both work on any [`TemplateArena`], so template expressions and script
//! statements share one evaluator.

use tply_ir::{ExprId, ExprKind, Literal, PatternId, PatternKind, TemplateArena};

use crate::environment::Env;
use crate::errors::{
    index_out_of_bounds, key_not_found, no_such_member, not_callable, not_destructurable,
    pattern_arity, type_mismatch, undefined_variable, EvalError,
};
use crate::Value;

/// Evaluate `id`. The resulting error, if any, points at the innermost
/// failing expression.
pub fn eval_expr(arena: &TemplateArena, id: ExprId, env: &Env) -> Result<Value, EvalError> {
    tply_stack::with_stack(|| eval_kind(arena, id, env)).map_err(|error| error.with_span(arena.expr(id).span))
}

fn eval_kind(arena: &TemplateArena, id: ExprId, env: &Env) -> Result<Value, EvalError> {
    match &arena.expr(id).kind {
        ExprKind::Const(Literal::Int(n)) => Ok(Value::Int(*n)),
        ExprKind::Const(Literal::Str(s)) => Ok(Value::str(s)),
        ExprKind::VarRef(name) => lookup(name, env),
        ExprKind::Index { target, index } => {
            let target = eval_expr(arena, *target, env)?;
            let index = eval_expr(arena, *index, env)?;
            index_value(&target, &index)
        }
        ExprKind::Slice { target, low, high } => {
            let target = eval_expr(arena, *target, env)?;
            let low = bound(arena, *low, env)?;
            let high = bound(arena, *high, env)?;
            slice_value(&target, low, high)
        }
        ExprKind::Member { target, names } => {
            let mut value = eval_expr(arena, *target, env)?;
            for name in names {
                value = member(&value, name)?;
            }
            Ok(value)
        }
        ExprKind::Call { callee, args } => call(arena, *callee, args, env),
        ExprKind::Tuple(items) => items
            .iter()
            .map(|&item| eval_expr(arena, item, env))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::tuple),
    }
}

/// Scope chain first, then the `globals` and `locals` pseudo-variables.
fn lookup(name: &str, env: &Env) -> Result<Value, EvalError> {
    if let Some(value) = env.lookup(name) {
        return Ok(value);
    }
    match name {
        "globals" => Ok(Value::Scope(env.global())),
        "locals" => Ok(Value::Scope(env.clone())),
        _ => Err(undefined_variable(name)),
    }
}

fn call(arena: &TemplateArena, callee: ExprId, args: &[ExprId], env: &Env) -> Result<Value, EvalError> {
    let function = eval_expr(arena, callee, env)?;

    // Builtin `and`/`or` only evaluate their right operand when needed.
    if let (Value::Function(f), [left, right]) = (&function, args) {
        if matches!(f.name(), "and" | "or") && is_builtin(arena, callee) {
            let left = eval_expr(arena, *left, env)?;
            return if left.is_truthy() == (f.name() == "and") {
                eval_expr(arena, *right, env)
            } else {
                Ok(left)
            };
        }
    }

    if !function.is_callable() {
        return Err(not_callable(function.type_name()));
    }
    let args = args
        .iter()
        .map(|&arg| eval_expr(arena, arg, env))
        .collect::<Result<Vec<_>, _>>()?;
    function.call(&args)
}

/// Whether `callee` is a bare operator name, as produced for `a and b`.
fn is_builtin(arena: &TemplateArena, callee: ExprId) -> bool {
    matches!(&arena.expr(callee).kind, ExprKind::VarRef(name) if name == "and" || name == "or")
}

fn bound(arena: &TemplateArena, expr: Option<ExprId>, env: &Env) -> Result<Option<i64>, EvalError> {
    let Some(expr) = expr else {
        return Ok(None);
    };
    match eval_expr(arena, expr, env)? {
        Value::Int(n) => Ok(Some(n)),
        Value::None => Ok(None),
        other => Err(type_mismatch("slice", &[other.type_name()]).with_span(arena.expr(expr).span)),
    }
}

/// Resolve a possibly negative index against `len`.
fn position(index: i64, len: usize) -> Option<usize> {
    let len_i = i64::try_from(len).ok()?;
    let resolved = if index < 0 { index + len_i } else { index };
    usize::try_from(resolved).ok().filter(|&i| i < len)
}

fn index_value(target: &Value, index: &Value) -> Result<Value, EvalError> {
    match (target, index) {
        (Value::List(items) | Value::Tuple(items), Value::Int(i)) => position(*i, items.len())
            .map(|at| items[at].clone())
            .ok_or_else(|| index_out_of_bounds(*i, items.len())),
        (Value::Str(s), Value::Int(i)) => {
            let len = s.chars().count();
            position(*i, len)
                .and_then(|at| s.chars().nth(at))
                .map(|ch| Value::str(ch.encode_utf8(&mut [0; 4])))
                .ok_or_else(|| index_out_of_bounds(*i, len))
        }
        (Value::Map(entries), Value::Str(key)) => entries
            .get(&**key)
            .cloned()
            .ok_or_else(|| key_not_found(key)),
        _ => Err(type_mismatch("[]", &[target.type_name(), index.type_name()])),
    }
}

/// Clamp a slice bound the way negative indexing reads it.
fn clamp(bound: i64, len: usize) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if bound < 0 { bound.saturating_add(len_i) } else { bound };
    usize::try_from(resolved.clamp(0, len_i)).unwrap_or(0)
}

fn slice_value(target: &Value, low: Option<i64>, high: Option<i64>) -> Result<Value, EvalError> {
    let range = |len: usize| {
        let start = low.map_or(0, |b| clamp(b, len));
        let end = high.map_or(len, |b| clamp(b, len));
        start..end.max(start)
    };
    match target {
        Value::List(items) => Ok(Value::list(items[range(items.len())].to_vec())),
        Value::Tuple(items) => Ok(Value::tuple(items[range(items.len())].to_vec())),
        Value::Str(s) => {
            let range = range(s.chars().count());
            let text: String = s.chars().skip(range.start).take(range.len()).collect();
            Ok(Value::from(text))
        }
        other => Err(type_mismatch("slice", &[other.type_name()])),
    }
}

fn member(target: &Value, name: &str) -> Result<Value, EvalError> {
    match target {
        Value::Map(entries) => entries
            .get(name)
            .cloned()
            .ok_or_else(|| no_such_member(name, "map")),
        other => Err(no_such_member(name, other.type_name())),
    }
}

/// Bind `value` to the names in `pattern`, defining them in `env`.
pub fn bind_pattern(arena: &TemplateArena, pattern: PatternId, value: Value, env: &Env) -> Result<(), EvalError> {
    let node = arena.pattern(pattern);
    match &node.kind {
        PatternKind::Var(name) => {
            env.define(name.as_str(), value);
            Ok(())
        }
        PatternKind::Tuple(items) => {
            let elements = match &value {
                Value::List(elements) | Value::Tuple(elements) => elements,
                other => return Err(not_destructurable(other.type_name()).with_span(node.span)),
            };
            if elements.len() != items.len() {
                return Err(pattern_arity(items.len(), elements.len()).with_span(node.span));
            }
            for (&item, element) in items.iter().zip(elements.iter()) {
                bind_pattern(arena, item, element.clone(), env)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
