use pretty_assertions::assert_eq;

use super::*;

#[test]
fn child_sees_parent_but_not_siblings() {
    let globals = Env::globals();
    globals.define("x", Value::Int(1));
    let a = globals.child();
    let b = globals.child();
    a.define("y", Value::Int(2));

    assert_eq!(a.lookup("x"), Some(Value::Int(1)));
    assert_eq!(a.lookup("y"), Some(Value::Int(2)));
    assert_eq!(b.lookup("y"), None);
    assert_eq!(globals.lookup("y"), None);
}

#[test]
fn nearer_binding_shadows() {
    let globals = Env::globals();
    globals.define("x", Value::Int(1));
    let inner = globals.child();
    inner.define("x", Value::Int(2));
    assert_eq!(inner.lookup("x"), Some(Value::Int(2)));
    assert_eq!(globals.lookup("x"), Some(Value::Int(1)));
}

#[test]
fn prelude_is_reachable() {
    let globals = Env::globals();
    assert_eq!(globals.lookup("True"), Some(Value::Bool(true)));
    assert!(globals.lookup("len").is_some_and(|v| v.is_callable()));
    assert!(globals.lookup("+").is_some());
}

#[test]
fn visible_bindings_exclude_prelude() {
    let globals = Env::globals();
    globals.define("a", Value::Int(1));
    let inner = globals.child();
    inner.define("b", Value::Int(2));
    inner.define("a", Value::Int(3));

    let names: Vec<(String, Value)> = inner.visible_bindings().into_iter().collect();
    assert_eq!(
        names,
        vec![("a".to_string(), Value::Int(3)), ("b".to_string(), Value::Int(2))]
    );
    assert_eq!(globals.visible_bindings().len(), 1);
}

#[test]
fn global_walks_up_to_the_scope_below_the_prelude() {
    let globals = Env::globals();
    let inner = globals.child().child();
    assert!(inner.global().ptr_eq(&globals));
    assert!(globals.global().ptr_eq(&globals));
}
