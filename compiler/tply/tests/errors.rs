//! Error reporting through the public API.

use pretty_assertions::assert_eq;
use tply::{compile, evaluate, Bindings, Error, Location, Options};

fn failure(source: &str) -> Error {
    let options = Options::default().with_file_name("t.tply");
    match evaluate(source, &Bindings::new(), &options) {
        Ok(text) => panic!("expected an error, rendered {text:?}"),
        Err(error) => error,
    }
}

fn at(line: u32, column: u32) -> Location {
    Location {
        file: "t.tply".to_string(),
        line,
        column,
    }
}

#[test]
fn scan_errors_are_located() {
    let error = failure("ok\n{{ a $ b }}");
    assert!(matches!(error, Error::Scan { .. }));
    assert_eq!(error.location(), Some(&at(2, 6)));
    assert_eq!(error.code().as_str().chars().next(), Some('E'));
    assert!(error.code().is_scan_error());
}

#[test]
fn parse_errors_are_located() {
    let error = failure("{% for x in xs %}\n{% endif %}");
    assert!(matches!(error, Error::Parse { .. }));
    assert!(error.code().is_parse_error());
    assert_eq!(error.location().map(|location| location.line), Some(2));
}

#[test]
fn eval_errors_display_file_line_and_column() {
    let error = failure("a\nb {{ nope }}");
    assert!(error.code().is_eval_error());
    assert_eq!(error.to_string(), "t.tply:2:6: variable 'nope' is not defined");
}

#[test]
fn rendered_errors_point_at_the_source() {
    let error = failure("a\nb {{ nope }}");
    let rendered = error.render();
    assert!(rendered.starts_with("error[E2001]: variable 'nope' is not defined\n"));
    assert!(rendered.contains("--> t.tply:2:6"));
    assert!(rendered.contains("2 | b {{ nope }}"));
}

#[test]
fn disabled_scripts_are_errors() {
    let options = Options::default().without_scripts();
    let error = evaluate("x\n{! y = 1 !}\n", &Bindings::new(), &options).expect_err("scripts are off");
    assert!(matches!(error, Error::Eval { .. }));
    assert_eq!(error.location().map(|location| (location.line, location.column)), Some((2, 1)));
}

#[test]
fn script_errors_point_inside_the_block() {
    let error = failure("{! y = missing !}");
    assert_eq!(error.to_string(), "t.tply:1:8: variable 'missing' is not defined");
}

#[test]
fn compile_uses_the_given_name() {
    let template = compile("{{ x }}", "page.tply").expect("compiles");
    let error = template
        .render(&Bindings::new(), &Options::default())
        .expect_err("x is unbound");
    assert_eq!(error.to_string(), "page.tply:1:4: variable 'x' is not defined");
}

#[test]
fn nothing_renders_after_a_failure() {
    let error = failure("{% for i in range(0, 3) %}{{ 10 // (1 - i) }}{% endfor %}");
    assert_eq!(error.to_string(), "t.tply:1:30: division by zero");
}
