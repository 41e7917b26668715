use pretty_assertions::assert_eq;
use tply_ir::{Span, StmtKind};

use super::*;
use crate::errors::EvalErrorKind;

fn eval_in(source: &str, env: &Env) -> Result<Value, EvalError> {
    let text = format!("{{{{ {source} }}}}");
    let template = tply_parse::parse("test", &text).expect("expression parses");
    let stmt = template.arena.body(template.root)[0];
    let StmtKind::Expression(expr) = template.arena.stmt(stmt).kind else {
        panic!("not an expression statement");
    };
    eval_expr(&template.arena, expr, env)
}

fn eval(source: &str) -> Result<Value, EvalError> {
    let env = Env::globals();
    env.define("xs", Value::from(vec![10, 20, 30]));
    env.define("name", Value::from("hello"));
    let config: std::collections::BTreeMap<String, Value> = [
        ("debug".to_string(), Value::Bool(true)),
        ("port".to_string(), Value::Int(8080)),
    ]
    .into_iter()
    .collect();
    env.define("config", Value::from(config));
    eval_in(source, &env)
}

fn shown(source: &str) -> String {
    eval(source).map_or_else(|e| format!("error: {e}"), |v| v.repr())
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(shown("1 + 2 * 3"), "6");
    assert_eq!(shown("(1 + 2) * 3"), "9");
    assert_eq!(shown("2 ** 3 ** 2"), "512");
    assert_eq!(shown("-2 ** 2"), "-4");
    assert_eq!(shown("7 // 2 + 7 % 2"), "4");
}

#[test]
fn strings_and_pipes() {
    assert_eq!(shown("'foo-bar' |> snake |> upper"), "'FOO_BAR'");
    assert_eq!(shown("name + ' world'"), "'hello world'");
    assert_eq!(shown("'ell' in name"), "True");
}

#[test]
fn indexing() {
    assert_eq!(shown("xs[0]"), "10");
    assert_eq!(shown("xs[-1]"), "30");
    assert_eq!(shown("name[1]"), "'e'");
    assert_eq!(shown("config['port']"), "8080");
    assert_eq!(shown("xs[3]"), "error: index 3 is out of range for length 3");
    assert_eq!(shown("config['nope']"), "error: key 'nope' not found");
}

#[test]
fn slicing_clamps() {
    assert_eq!(shown("xs[1:]"), "[20, 30]");
    assert_eq!(shown("xs[:-1]"), "[10, 20]");
    assert_eq!(shown("xs[-10:10]"), "[10, 20, 30]");
    assert_eq!(shown("xs[2:1]"), "[]");
    assert_eq!(shown("name[1:3]"), "'el'");
}

#[test]
fn member_access_reads_map_keys() {
    assert_eq!(shown("config.debug"), "True");
    assert_eq!(shown("config.missing"), "error: a value of type map has no member 'missing'");
    assert_eq!(shown("xs.length"), "error: a value of type list has no member 'length'");
}

#[test]
fn tuples_and_calls() {
    assert_eq!(shown("(1, 'a')"), "(1, 'a')");
    assert_eq!(shown("len(xs)"), "3");
    assert_eq!(shown("str(len(name))"), "'5'");
}

#[test]
fn logic_short_circuits() {
    assert_eq!(shown("0 and undefined_name"), "0");
    assert_eq!(shown("1 or undefined_name"), "1");
    assert_eq!(shown("not xs"), "False");
    assert_eq!(shown("1 < 2 and 2 < 3"), "True");
}

#[test]
fn undefined_variable_points_at_the_name() {
    let error = eval("1 + nope").expect_err("undefined");
    assert_eq!(error.kind, EvalErrorKind::UndefinedVariable { name: "nope".into() });
    assert_eq!(error.span, Some(Span::new(7, 11)));
}

#[test]
fn calling_a_non_function_fails() {
    assert_eq!(shown("xs(1)"), "error: a value of type list is not callable");
}

#[test]
fn globals_and_locals_pseudo_variables() {
    let globals = Env::globals();
    globals.define("a", Value::Int(1));
    let inner = globals.child();
    inner.define("b", Value::Int(2));
    assert_eq!(eval_in("globals()", &inner).map(|v| v.repr()), Ok("{'a': 1}".to_string()));
    assert_eq!(eval_in("locals()", &inner).map(|v| v.repr()), Ok("{'a': 1, 'b': 2}".to_string()));
}

#[test]
fn tuple_patterns_check_arity() {
    let template = tply_parse::parse("test", "{% for a, b in xs %}{% endfor %}").expect("parses");
    let stmt = template.arena.body(template.root)[0];
    let StmtKind::For { pattern, .. } = template.arena.stmt(stmt).kind else {
        panic!("not a for statement");
    };
    let env = Env::globals();

    bind_pattern(&template.arena, pattern, Value::tuple(vec![1.into(), 2.into()]), &env).expect("binds");
    assert_eq!(env.lookup("b"), Some(Value::Int(2)));

    let error = bind_pattern(&template.arena, pattern, Value::from(vec![1, 2, 3]), &env).expect_err("arity");
    assert_eq!(error.kind, EvalErrorKind::PatternArity { expected: 2, got: 3 });

    let error = bind_pattern(&template.arena, pattern, Value::Int(1), &env).expect_err("not a sequence");
    assert_eq!(error.kind, EvalErrorKind::NotDestructurable { type_name: "int" });
}
