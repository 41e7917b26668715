//! The prelude: constants, builtin functions and operators.

use crate::environment::Env;
use crate::errors::{invalid_argument, type_mismatch, wrong_arg_count, EvalError};
use crate::operators;
use crate::value::{Function, Value};

type BuiltinResult = Result<Value, EvalError>;

pub(crate) fn install(env: &Env) {
    env.define("None", Value::None);
    env.define("True", Value::Bool(true));
    env.define("False", Value::Bool(false));

    let functions: [(&str, fn(&[Value]) -> BuiltinResult); 11] = [
        ("range", range),
        ("len", len),
        ("str", |args| one("str", args).map(|v| Value::from(v.to_string()))),
        ("repr", |args| one("repr", args).map(|v| Value::from(v.repr()))),
        ("enumerate", enumerate),
        ("zip", zip),
        ("reversed", reversed),
        ("upper", |args| string("upper", args).map(|s| Value::from(s.to_uppercase()))),
        ("lower", |args| string("lower", args).map(|s| Value::from(s.to_lowercase()))),
        ("snake", |args| string("snake", args).map(|s| Value::from(snake_case(s)))),
        ("camel", |args| string("camel", args).map(|s| Value::from(camel_case(s)))),
    ];
    for (name, imp) in functions {
        env.define(name, Value::Function(Function::new(name, imp)));
    }

    operators::install(env);
}

fn one<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    match args {
        [value] => Ok(value),
        _ => Err(wrong_arg_count(name, "1", args.len())),
    }
}

fn string<'a>(name: &'static str, args: &'a [Value]) -> Result<&'a str, EvalError> {
    match one(name, args)? {
        Value::Str(s) => Ok(&**s),
        other => Err(type_mismatch(name, &[other.type_name()])),
    }
}

fn int_arg(name: &'static str, value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(type_mismatch(name, &[other.type_name()])),
    }
}

/// `range(stop)`, `range(start, stop)` or `range(start, stop, step)`.
fn range(args: &[Value]) -> BuiltinResult {
    let ints = args
        .iter()
        .map(|arg| int_arg("range", arg))
        .collect::<Result<Vec<_>, _>>()?;
    let (start, stop, step) = match ints[..] {
        [stop] => (0, stop, 1),
        [start, stop] => (start, stop, 1),
        [start, stop, step] => (start, stop, step),
        _ => return Err(wrong_arg_count("range", "1 to 3", args.len())),
    };
    if step == 0 {
        return Err(invalid_argument("range() step must not be zero"));
    }
    let mut items = Vec::new();
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        items.push(Value::Int(current));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(Value::list(items))
}

fn len(args: &[Value]) -> BuiltinResult {
    let count = match one("len", args)? {
        Value::Str(s) => s.chars().count(),
        Value::List(items) | Value::Tuple(items) => items.len(),
        Value::Map(entries) => entries.len(),
        other => return Err(type_mismatch("len", &[other.type_name()])),
    };
    Ok(Value::Int(i64::try_from(count).unwrap_or(i64::MAX)))
}

/// `enumerate(xs)` or `enumerate(xs, start)`: `(index, element)` pairs.
fn enumerate(args: &[Value]) -> BuiltinResult {
    let (items, start) = match args {
        [items] => (items, 0),
        [items, start] => (items, int_arg("enumerate", start)?),
        _ => return Err(wrong_arg_count("enumerate", "1 or 2", args.len())),
    };
    let mut index = start;
    let mut pairs = Vec::new();
    for item in items.iterate()? {
        pairs.push(Value::tuple(vec![Value::Int(index), item]));
        index = index.saturating_add(1);
    }
    Ok(Value::list(pairs))
}

/// Tuples of corresponding elements, as long as the shortest argument.
fn zip(args: &[Value]) -> BuiltinResult {
    let columns = args
        .iter()
        .map(Value::iterate)
        .collect::<Result<Vec<_>, _>>()?;
    let rows = columns.iter().map(Vec::len).min().unwrap_or(0);
    let zipped = (0..rows)
        .map(|row| Value::tuple(columns.iter().map(|column| column[row].clone()).collect()))
        .collect();
    Ok(Value::list(zipped))
}

fn reversed(args: &[Value]) -> BuiltinResult {
    let mut items = one("reversed", args)?.iterate()?;
    items.reverse();
    Ok(Value::list(items))
}

/// `fooBar` and `FooBar` become `foo_bar`. A name containing `-` only has
/// its dashes replaced.
pub(crate) fn snake_case(name: &str) -> String {
    if name.contains('-') {
        return name.replace('-', "_");
    }
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let after_word = prev.is_lowercase() || prev.is_ascii_digit();
            if after_word || (next_is_lower && prev != '_') {
                out.push('_');
            }
        }
        out.extend(ch.to_lowercase());
    }
    out
}

/// `foo_bar` and `foo-bar` become `FooBar`.
pub(crate) fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
        } else if ch != '_' && ch != '-' {
            out.push(ch);
        }
        prev_alpha = ch.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests;
