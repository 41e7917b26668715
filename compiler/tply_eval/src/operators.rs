//! Operator functions.
//!
//! The parser turns `a + b` into a call of the variable `+`, so every
//! operator is an ordinary prelude binding. Unary `-`, `+` and `~` share
//! their symbol with the binary form and are told apart by argument count.

use std::cmp::Ordering;

use crate::environment::Env;
use crate::errors::{division_by_zero, invalid_argument, overflow, type_mismatch, wrong_arg_count, EvalError};
use crate::value::{Function, Value};

type OpResult = Result<Value, EvalError>;

pub(crate) fn install(env: &Env) {
    let table: [(&str, fn(&[Value]) -> OpResult); 25] = [
        ("+", plus),
        ("-", minus),
        ("*", times),
        ("/", divide),
        ("//", floor_divide),
        ("%", modulo),
        ("**", power),
        ("@", matmul),
        ("<<", shift_left),
        (">>", shift_right),
        ("&", bit_and),
        ("|", bit_or),
        ("^", bit_xor),
        ("~", invert),
        ("==", |args| binary("==", args).map(|(a, b)| Value::Bool(a == b))),
        ("!=", |args| binary("!=", args).map(|(a, b)| Value::Bool(a != b))),
        ("<", |args| compare_with("<", args, Ordering::is_lt)),
        ("<=", |args| compare_with("<=", args, Ordering::is_le)),
        (">", |args| compare_with(">", args, Ordering::is_gt)),
        (">=", |args| compare_with(">=", args, Ordering::is_ge)),
        ("in", contains),
        ("not", |args| unary("not", args).map(|a| Value::Bool(!a.is_truthy()))),
        ("and", |args| binary("and", args).map(|(a, b)| if a.is_truthy() { b.clone() } else { a.clone() })),
        ("or", |args| binary("or", args).map(|(a, b)| if a.is_truthy() { a.clone() } else { b.clone() })),
        ("|>", pipe),
    ];
    for (symbol, imp) in table {
        env.define(symbol, Value::Function(Function::new(symbol, imp)));
    }
}

fn unary<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    match args {
        [a] => Ok(a),
        _ => Err(wrong_arg_count(name, "1", args.len())),
    }
}

fn binary<'a>(name: &str, args: &'a [Value]) -> Result<(&'a Value, &'a Value), EvalError> {
    match args {
        [a, b] => Ok((a, b)),
        _ => Err(wrong_arg_count(name, "2", args.len())),
    }
}

#[derive(Copy, Clone)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Num> {
        match value {
            Value::Int(n) => Some(Num::Int(*n)),
            Value::Bool(b) => Some(Num::Int(i64::from(*b))),
            Value::Float(x) => Some(Num::Float(*x)),
            _ => None,
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "mixed arithmetic promotes to float")]
    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(x) => x,
        }
    }
}

/// Apply an arithmetic operator to two numbers: checked integer arithmetic
/// when both are integers, float arithmetic otherwise.
fn arithmetic(
    name: &'static str,
    a: &Value,
    b: &Value,
    int: impl Fn(i64, i64) -> Option<i64>,
    float: impl Fn(f64, f64) -> f64,
) -> OpResult {
    match (Num::of(a), Num::of(b)) {
        (Some(Num::Int(x)), Some(Num::Int(y))) => int(x, y).map(Value::Int).ok_or_else(|| overflow(name)),
        (Some(x), Some(y)) => Ok(Value::Float(float(x.to_f64(), y.to_f64()))),
        _ => Err(type_mismatch(name, &[a.type_name(), b.type_name()])),
    }
}

fn plus(args: &[Value]) -> OpResult {
    if let [a] = args {
        return match Num::of(a) {
            Some(Num::Int(n)) => Ok(Value::Int(n)),
            Some(Num::Float(x)) => Ok(Value::Float(x)),
            None => Err(type_mismatch("unary +", &[a.type_name()])),
        };
    }
    let (a, b) = binary("+", args)?;
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(Value::from(format!("{x}{y}"))),
        (Value::List(x), Value::List(y)) => Ok(Value::list(x.iter().chain(y.iter()).cloned().collect())),
        (Value::Tuple(x), Value::Tuple(y)) => Ok(Value::tuple(x.iter().chain(y.iter()).cloned().collect())),
        _ => arithmetic("+", a, b, i64::checked_add, |x, y| x + y),
    }
}

fn minus(args: &[Value]) -> OpResult {
    if let [a] = args {
        return match Num::of(a) {
            Some(Num::Int(n)) => n.checked_neg().map(Value::Int).ok_or_else(|| overflow("-")),
            Some(Num::Float(x)) => Ok(Value::Float(-x)),
            None => Err(type_mismatch("unary -", &[a.type_name()])),
        };
    }
    let (a, b) = binary("-", args)?;
    arithmetic("-", a, b, i64::checked_sub, |x, y| x - y)
}

fn repeat<T: Clone>(items: &[T], count: i64) -> Vec<T> {
    let count = usize::try_from(count).unwrap_or(0);
    let mut out = Vec::with_capacity(items.len().saturating_mul(count));
    for _ in 0..count {
        out.extend_from_slice(items);
    }
    out
}

fn times(args: &[Value]) -> OpResult {
    let (a, b) = binary("*", args)?;
    match (a, b) {
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            Ok(Value::from(s.repeat(usize::try_from(*n).unwrap_or(0))))
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
            Ok(Value::list(repeat(items.as_slice(), *n)))
        }
        _ => arithmetic("*", a, b, i64::checked_mul, |x, y| x * y),
    }
}

fn divide(args: &[Value]) -> OpResult {
    let (a, b) = binary("/", args)?;
    match (Num::of(a), Num::of(b)) {
        (Some(_), Some(y)) if y.to_f64() == 0.0 => Err(division_by_zero()),
        (Some(x), Some(y)) => Ok(Value::Float(x.to_f64() / y.to_f64())),
        _ => Err(type_mismatch("/", &[a.type_name(), b.type_name()])),
    }
}

fn floor_div_int(x: i64, y: i64) -> Option<i64> {
    let quotient = x.checked_div(y)?;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

fn floor_mod_int(x: i64, y: i64) -> Option<i64> {
    let rem = x.checked_rem(y)?;
    if rem != 0 && ((rem < 0) != (y < 0)) {
        rem.checked_add(y)
    } else {
        Some(rem)
    }
}

fn floor_mod_float(x: f64, y: f64) -> f64 {
    let rem = x % y;
    if rem != 0.0 && ((rem < 0.0) != (y < 0.0)) {
        rem + y
    } else {
        rem
    }
}

fn is_zero(value: &Value) -> bool {
    Num::of(value).is_some_and(|n| n.to_f64() == 0.0)
}

fn floor_divide(args: &[Value]) -> OpResult {
    let (a, b) = binary("//", args)?;
    if is_zero(b) && Num::of(a).is_some() {
        return Err(division_by_zero());
    }
    arithmetic("//", a, b, floor_div_int, |x, y| (x / y).floor())
}

fn modulo(args: &[Value]) -> OpResult {
    let (a, b) = binary("%", args)?;
    if is_zero(b) && Num::of(a).is_some() {
        return Err(division_by_zero());
    }
    arithmetic("%", a, b, floor_mod_int, floor_mod_float)
}

fn power(args: &[Value]) -> OpResult {
    let (a, b) = binary("**", args)?;
    match (Num::of(a), Num::of(b)) {
        (Some(Num::Int(x)), Some(Num::Int(y))) if y >= 0 => {
            let exp = u32::try_from(y).map_err(|_| overflow("**"))?;
            x.checked_pow(exp).map(Value::Int).ok_or_else(|| overflow("**"))
        }
        (Some(x), Some(y)) => Ok(Value::Float(x.to_f64().powf(y.to_f64()))),
        _ => Err(type_mismatch("**", &[a.type_name(), b.type_name()])),
    }
}

fn matmul(args: &[Value]) -> OpResult {
    let (a, b) = binary("@", args)?;
    Err(type_mismatch("@", &[a.type_name(), b.type_name()]))
}

fn int_operands(name: &str, args: &[Value]) -> Result<(i64, i64), EvalError> {
    match binary(name, args)? {
        (Value::Int(x), Value::Int(y)) => Ok((*x, *y)),
        (a, b) => Err(type_mismatch(name, &[a.type_name(), b.type_name()])),
    }
}

fn shift_amount(y: i64) -> Result<u32, EvalError> {
    u32::try_from(y).map_err(|_| invalid_argument("negative shift count"))
}

fn shift_left(args: &[Value]) -> OpResult {
    let (x, y) = int_operands("<<", args)?;
    let amount = shift_amount(y)?;
    match x.checked_shl(amount) {
        Some(shifted) if shifted >> amount == x => Ok(Value::Int(shifted)),
        _ if x == 0 => Ok(Value::Int(0)),
        _ => Err(overflow("<<")),
    }
}

fn shift_right(args: &[Value]) -> OpResult {
    let (x, y) = int_operands(">>", args)?;
    let amount = shift_amount(y)?;
    Ok(Value::Int(x.checked_shr(amount).unwrap_or(if x < 0 { -1 } else { 0 })))
}

fn bitwise(name: &'static str, args: &[Value], bools: fn(bool, bool) -> bool, ints: fn(i64, i64) -> i64) -> OpResult {
    if let Ok((Value::Bool(x), Value::Bool(y))) = binary(name, args) {
        return Ok(Value::Bool(bools(*x, *y)));
    }
    let (x, y) = int_operands(name, args)?;
    Ok(Value::Int(ints(x, y)))
}

fn bit_and(args: &[Value]) -> OpResult {
    bitwise("&", args, |x, y| x & y, |x, y| x & y)
}

fn bit_or(args: &[Value]) -> OpResult {
    bitwise("|", args, |x, y| x | y, |x, y| x | y)
}

fn bit_xor(args: &[Value]) -> OpResult {
    bitwise("^", args, |x, y| x ^ y, |x, y| x ^ y)
}

fn invert(args: &[Value]) -> OpResult {
    match unary("~", args)? {
        Value::Int(n) => Ok(Value::Int(!n)),
        other => Err(type_mismatch("~", &[other.type_name()])),
    }
}

/// Ordering used by `<`, `<=`, `>` and `>=`.
pub(crate) fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::List(x), Value::List(y)) | (Value::Tuple(x), Value::Tuple(y)) => {
            for (left, right) in x.iter().zip(y.iter()) {
                match compare(left, right)? {
                    Ordering::Equal => {}
                    unequal => return Some(unequal),
                }
            }
            Some(x.len().cmp(&y.len()))
        }
        _ => match (Num::of(a)?, Num::of(b)?) {
            (Num::Int(x), Num::Int(y)) => Some(x.cmp(&y)),
            (x, y) => x.to_f64().partial_cmp(&y.to_f64()),
        },
    }
}

fn compare_with(name: &str, args: &[Value], accept: fn(Ordering) -> bool) -> OpResult {
    let (a, b) = binary(name, args)?;
    compare(a, b)
        .map(|ordering| Value::Bool(accept(ordering)))
        .ok_or_else(|| type_mismatch(name, &[a.type_name(), b.type_name()]))
}

fn contains(args: &[Value]) -> OpResult {
    let (needle, haystack) = binary("in", args)?;
    let found = match (needle, haystack) {
        (Value::Str(n), Value::Str(h)) => h.contains(&**n),
        (_, Value::List(items) | Value::Tuple(items)) => items.contains(needle),
        (Value::Str(key), Value::Map(entries)) => entries.contains_key(&**key),
        (_, Value::Map(_)) => false,
        _ => return Err(type_mismatch("in", &[needle.type_name(), haystack.type_name()])),
    };
    Ok(Value::Bool(found))
}

fn pipe(args: &[Value]) -> OpResult {
    let (value, function) = binary("|>", args)?;
    function.call(std::slice::from_ref(value))
}
