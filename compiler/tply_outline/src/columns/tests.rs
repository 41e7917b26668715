use pretty_assertions::assert_eq;
use tply_ir::{BodyId, StmtKind, Template};

use super::*;

fn first_body(template: &Template) -> BodyId {
    let first = template.arena.body(template.root)[0];
    template.arena.stmt(first).kind.bodies()[0]
}

fn indent_of(source: &str) -> Option<u32> {
    let template = tply_parse::parse("test", source).expect("template parses");
    inner_indent(&template.arena, first_body(&template))
}

#[test]
fn inner_indent_is_the_least_indented_line() {
    assert_eq!(indent_of("{% for x in xs %}\n    a\n  b\n{% endfor %}"), Some(2));
}

#[test]
fn inner_indent_counts_expressions() {
    assert_eq!(indent_of("{% for x in xs %}\n   {{x}}\n{% endfor %}"), Some(3));
}

#[test]
fn inner_indent_includes_nested_bodies() {
    let source = "{% for x in xs %}\n    {% if x %}\n  y\n    {% endif %}\n{% endfor %}";
    assert_eq!(indent_of(source), Some(2));
}

#[test]
fn inner_indent_of_empty_body_is_none() {
    assert_eq!(indent_of("{% for x in xs %}{% endfor %}"), None);
    assert_eq!(indent_of("{% for x in xs %}  \n   {% endfor %}"), None);
}

#[test]
fn tabs_count_as_one_column() {
    assert_eq!(indent_of("{% for x in xs %}\n\t\tx\n{% endfor %}"), Some(2));
}

#[test]
fn indent_levels_ignore_content_before_statement() {
    let template = tply_parse::parse("test", "ab\n  {{x}} {{y}}\n\t{% for a in b %}{% endfor %}").expect("parses");
    let mut layout = Layout::new(template.arena.stmt_capacity());
    assign_indent_levels(&template.arena, template.root, &mut layout);

    let levels: Vec<(bool, u32)> = template
        .arena
        .body(template.root)
        .iter()
        .filter(|&&stmt| !matches!(template.arena.stmt(stmt).kind, StmtKind::Text(_)))
        .map(|&stmt| (template.arena.stmt(stmt).kind.is_block(), layout.indent_level(stmt)))
        .collect();
    assert_eq!(levels, vec![(false, 2), (false, 2), (true, 1)]);
}
