use pretty_assertions::assert_eq;

use super::*;

fn call(name: &str, args: &[Value]) -> Result<Value, EvalError> {
    Env::prelude().lookup(name).expect("builtin is bound").call(args)
}

#[test]
fn range_forms() {
    assert_eq!(call("range", &[Value::Int(3)]), Ok(Value::from(vec![0, 1, 2])));
    assert_eq!(call("range", &[Value::Int(1), Value::Int(3)]), Ok(Value::from(vec![1, 2])));
    assert_eq!(
        call("range", &[Value::Int(5), Value::Int(0), Value::Int(-2)]),
        Ok(Value::from(vec![5, 3, 1]))
    );
    assert_eq!(call("range", &[Value::Int(3), Value::Int(0)]), Ok(Value::from(Vec::<Value>::new())));
    assert!(call("range", &[Value::Int(0), Value::Int(3), Value::Int(0)]).is_err());
    assert!(call("range", &["3".into()]).is_err());
}

#[test]
fn len_counts_characters() {
    assert_eq!(call("len", &["héllo".into()]), Ok(Value::Int(5)));
    assert_eq!(call("len", &[Value::from(vec![1, 2])]), Ok(Value::Int(2)));
    assert!(call("len", &[Value::Int(1)]).is_err());
}

#[test]
fn str_and_repr() {
    assert_eq!(call("str", &["a".into()]), Ok("a".into()));
    assert_eq!(call("repr", &["a".into()]), Ok("'a'".into()));
    assert_eq!(call("str", &[Value::Bool(true)]), Ok("True".into()));
}

#[test]
fn enumerate_zip_reversed() {
    let xs = Value::from(vec!["a", "b"]);
    assert_eq!(
        call("enumerate", &[xs.clone()]).map(|v| v.to_string()),
        Ok("[(0, 'a'), (1, 'b')]".to_string())
    );
    assert_eq!(
        call("zip", &[xs.clone(), Value::from(vec![1, 2, 3])]).map(|v| v.to_string()),
        Ok("[('a', 1), ('b', 2)]".to_string())
    );
    assert_eq!(call("reversed", &[xs]).map(|v| v.to_string()), Ok("['b', 'a']".to_string()));
}

#[test]
fn case_conversion() {
    assert_eq!(snake_case("fooBar"), "foo_bar");
    assert_eq!(snake_case("FooBar"), "foo_bar");
    assert_eq!(snake_case("HTTPServer"), "http_server");
    assert_eq!(snake_case("foo-bar"), "foo_bar");
    assert_eq!(snake_case("version2Name"), "version2_name");
    assert_eq!(camel_case("foo_bar"), "FooBar");
    assert_eq!(camel_case("foo-bar-baz"), "FooBarBaz");
    assert_eq!(call("upper", &["foo_bar".into()]), Ok("FOO_BAR".into()));
    assert!(call("upper", &[Value::Int(1)]).is_err());
}
