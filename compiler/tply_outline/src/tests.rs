use pretty_assertions::assert_eq;
use tply_ir::{BodyId, StmtId, StmtKind, TemplateArena};

use super::*;

fn outlined(source: &str) -> OutlinedTemplate {
    outline(tply_parse::parse("test", source).expect("template parses"))
}

/// Flatten a body: text verbatim, `@` for expressions, `!` for scripts,
/// `<...>` around block bodies with `|` between if cases.
fn dump(arena: &TemplateArena, body: BodyId) -> String {
    let mut out = String::new();
    for &stmt in arena.body(body) {
        match &arena.stmt(stmt).kind {
            StmtKind::Text(text) => out.push_str(text),
            StmtKind::Comment(_) => out.push('#'),
            StmtKind::Expression(_) => out.push('@'),
            StmtKind::Script(_) => out.push('!'),
            kind => {
                let bodies: Vec<String> = kind.bodies().into_iter().map(|b| dump(arena, b)).collect();
                out.push('<');
                out.push_str(&bodies.join("|"));
                out.push('>');
            }
        }
    }
    out
}

fn shape(source: &str) -> String {
    let template = outlined(source);
    dump(template.arena(), template.root())
}

fn non_text(template: &OutlinedTemplate) -> Vec<StmtId> {
    template
        .arena()
        .body(template.root())
        .iter()
        .copied()
        .filter(|&stmt| template.arena().text(stmt).is_none())
        .collect()
}

#[test]
fn plain_text_is_untouched() {
    assert_eq!(shape("héllo 🐀\n\n  world\n"), "héllo 🐀\n\n  world\n");
}

#[test]
fn wrapped_for_loses_its_scaffolding() {
    let source = "a\n{% for x in xs %}\n  {{x}}\n{% endfor %}\nb\n";
    assert_eq!(shape(source), "a\n<@\n>b\n");
    let template = outlined(source);
    let stmts = non_text(&template);
    assert!(template.layout().is_wrapped(stmts[0]));
}

#[test]
fn inline_loop_is_left_as_written() {
    let source = "x{% for i in xs %}{{i}}{% endfor %}y";
    assert_eq!(shape(source), "x<@>y");
    let template = outlined(source);
    assert!(!template.layout().is_wrapped(non_text(&template)[0]));
}

#[test]
fn indented_loop_keeps_its_own_column() {
    let source = "  {% for i in range(0,3) %}\n    {{i}}\n  {% endfor %}\n";
    assert_eq!(shape(source), "<  @\n>");
}

#[test]
fn nested_loops_keep_relative_indentation() {
    let source = "{% for i in xs %}\ni{{i}}\n  {% for j in ys %}\n  j{{j}}\n  {% endfor %}\n{% endfor %}\n";
    assert_eq!(shape(source), "<i@\n<  j@\n>>");
}

#[test]
fn deeply_indented_inner_body_is_pulled_to_its_tag() {
    let source = "{% for i in xs %}\n  {% for j in ys %}\n      {{j}}\n  {% endfor %}\n{% endfor %}\n";
    assert_eq!(shape(source), "<<@\n>>");
}

#[test]
fn wrapped_if_strips_every_case() {
    let source = "{% if a %}\n  yes\n{% else %}\n  no\n{% endif %}\n";
    assert_eq!(shape(source), "<yes\n|no\n>");
}

#[test]
fn inline_if_is_left_as_written() {
    assert_eq!(shape("a{% if x %}b{% endif %}c"), "a<b>c");
}

#[test]
fn if_with_one_inline_case_is_inline() {
    let source = "{% if a %}\n  yes\n{% else %}no{% endif %}\n";
    assert_eq!(shape(source), "<\n  yes\n|no>\n");
}

#[test]
fn wrapped_setindent_and_join() {
    assert_eq!(shape("{% setindent 4 %}\n  x\n{% endsetindent %}\n"), "<x\n>");
    assert_eq!(shape("{% join x in xs with ', ' %}\n  {{x}}\n{% endjoin %}\n"), "<@\n>");
}

#[test]
fn whole_line_comment_takes_its_line() {
    assert_eq!(shape("a\n  {# note #}\nb"), "a\nb");
    assert_eq!(shape("a\n{# note #}"), "a\n");
    assert_eq!(shape("{# note #}\nb"), "b");
}

#[test]
fn inline_comment_leaves_neighbours() {
    assert_eq!(shape("a {# x #} b"), "a  b");
}

#[test]
fn comment_right_after_tag_keeps_block_wrapped() {
    let source = "{% for x in xs %}{# c #}\n  {{x}}\n{% endfor %}\n";
    assert_eq!(shape(source), "<@\n>");
}

#[test]
fn wrapped_script_swallows_its_line() {
    assert_eq!(shape("a\n  {! x = 1 !}\nb\n"), "a\n!b\n");
}

#[test]
fn inline_script_swallows_following_blanks() {
    assert_eq!(shape("a {! x = 1 !} b\nc"), "a !b\nc");
    assert_eq!(shape("a {! x = 1 !}\nc"), "a !c");
}

#[test]
fn outlined_template_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OutlinedTemplate>();
}
