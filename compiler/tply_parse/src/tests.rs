use pretty_assertions::assert_eq;
use tply_ir::{BodyId, ExprId, ExprKind, Literal, PatternId, PatternKind, StmtKind, Template, TemplateArena, TokenTag};

use super::*;

/// Compact rendering of an expression: operators and calls as `f(a, b)`.
fn expr(arena: &TemplateArena, id: ExprId) -> String {
    match &arena.expr(id).kind {
        ExprKind::Const(Literal::Int(v)) => v.to_string(),
        ExprKind::Const(Literal::Str(s)) => format!("{s:?}"),
        ExprKind::VarRef(name) => name.clone(),
        ExprKind::Index { target, index } => {
            format!("{}[{}]", expr(arena, *target), expr(arena, *index))
        }
        ExprKind::Slice { target, low, high } => format!(
            "{}[{}:{}]",
            expr(arena, *target),
            low.map(|e| expr(arena, e)).unwrap_or_default(),
            high.map(|e| expr(arena, e)).unwrap_or_default()
        ),
        ExprKind::Member { target, names } => format!("{}.{}", expr(arena, *target), names.join(".")),
        ExprKind::Call { callee, args } => {
            let args: Vec<String> = args.iter().map(|&a| expr(arena, a)).collect();
            format!("{}({})", expr(arena, *callee), args.join(", "))
        }
        ExprKind::Tuple(items) => {
            let items: Vec<String> = items.iter().map(|&a| expr(arena, a)).collect();
            format!("<{}>", items.join(", "))
        }
    }
}

fn pattern(arena: &TemplateArena, id: PatternId) -> String {
    match &arena.pattern(id).kind {
        PatternKind::Var(name) => name.clone(),
        PatternKind::Tuple(items) => {
            let items: Vec<String> = items.iter().map(|&p| pattern(arena, p)).collect();
            format!("<{}>", items.join(", "))
        }
    }
}

fn body(arena: &TemplateArena, id: BodyId) -> Vec<String> {
    arena
        .body(id)
        .iter()
        .map(|&stmt| match &arena.stmt(stmt).kind {
            StmtKind::Text(t) => format!("text {t:?}"),
            StmtKind::Comment(t) => format!("comment {t:?}"),
            StmtKind::Script(t) => format!("script {t:?}"),
            StmtKind::Expression(e) => format!("expr {}", expr(arena, *e)),
            StmtKind::If(cases) => {
                let cases: Vec<String> = cases
                    .iter()
                    .map(|case| {
                        let test = case.test.map_or("else".to_string(), |t| expr(arena, t));
                        format!("{test} => {:?}", body(arena, case.body))
                    })
                    .collect();
                format!("if [{}]", cases.join("; "))
            }
            StmtKind::For {
                pattern: p,
                iterable,
                body: b,
            } => format!(
                "for {} in {} {:?}",
                pattern(arena, *p),
                expr(arena, *iterable),
                body(arena, *b)
            ),
            StmtKind::Join {
                pattern: p,
                iterable,
                separator,
                body: b,
            } => format!(
                "join {} in {} with {} {:?}",
                pattern(arena, *p),
                expr(arena, *iterable),
                expr(arena, *separator),
                body(arena, *b)
            ),
            StmtKind::SetIndent { level, body: b } => {
                format!("setindent {} {:?}", expr(arena, *level), body(arena, *b))
            }
        })
        .collect()
}

fn parse_ok(source: &str) -> Template {
    parse("test.tply", source).unwrap()
}

fn dump(source: &str) -> Vec<String> {
    let template = parse_ok(source);
    body(&template.arena, template.root)
}

fn single_expr(source: &str) -> String {
    let template = parse_ok(&format!("{{{{ {source} }}}}"));
    let stmt = template.arena.body(template.root)[0];
    match template.arena.stmt(stmt).kind {
        StmtKind::Expression(e) => expr(&template.arena, e),
        ref other => panic!("not an expression: {other:?}"),
    }
}

#[test]
fn text_only() {
    assert_eq!(dump("hello\nworld"), vec![r#"text "hello\nworld""#]);
    assert_eq!(dump(""), Vec::<String>::new());
}

#[test]
fn expression_statement() {
    assert_eq!(dump("a{{ x }}b"), vec![r#"text "a""#, "expr x", r#"text "b""#]);
}

#[test]
fn comments_and_scripts_are_nodes() {
    assert_eq!(
        dump("{# note #}{! x = 1 !}"),
        vec![r#"comment " note ""#, r#"script " x = 1 ""#]
    );
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(single_expr("1 + 2 * 3"), "+(1, *(2, 3))");
    assert_eq!(single_expr("1 * 2 + 3"), "+(*(1, 2), 3)");
    assert_eq!(single_expr("1 - 2 - 3"), "-(-(1, 2), 3)");
}

#[test]
fn power_is_right_associative() {
    assert_eq!(single_expr("2 ** 3 ** 2"), "**(2, **(3, 2))");
}

#[test]
fn unary_binding() {
    assert_eq!(single_expr("-a ** 2"), "-(**(a, 2))");
    assert_eq!(single_expr("-a * b"), "*(-(a), b)");
    assert_eq!(single_expr("not a == b"), "not(==(a, b))");
    assert_eq!(single_expr("not a and b"), "and(not(a), b)");
}

#[test]
fn logical_and_comparison_levels() {
    assert_eq!(single_expr("a or b and c"), "or(a, and(b, c))");
    assert_eq!(single_expr("a < b or c in d"), "or(<(a, b), in(c, d))");
    assert_eq!(single_expr("a | b & c"), "|(a, &(b, c))");
    assert_eq!(single_expr("a & b << 1"), "&(a, <<(b, 1))");
    assert_eq!(single_expr("a | b ^ c"), "|(a, ^(b, c))");
}

#[test]
fn pipe_binds_tightest() {
    assert_eq!(single_expr("'foo-bar' |> snake |> upper"), r#"|>(|>("foo-bar", snake), upper)"#);
    assert_eq!(single_expr("a + b |> f"), "+(a, |>(b, f))");
}

#[test]
fn postfix_chains() {
    assert_eq!(single_expr("foo.bar.baz"), "foo.bar.baz");
    assert_eq!(single_expr("f(a, b)(c)"), "f(a, b)(c)");
    assert_eq!(single_expr("foo[1:3][0]"), "foo[1:3][0]");
    assert_eq!(single_expr("x[:2]"), "x[:2]");
    assert_eq!(single_expr("x[1:]"), "x[1:]");
    assert_eq!(single_expr("x[:]"), "x[:]");
    assert_eq!(single_expr("a.b(1).c"), "a.b(1).c");
    assert_eq!(single_expr("globals()"), "globals()");
}

#[test]
fn tuples_and_grouping() {
    assert_eq!(single_expr("(1 + 2) * 3"), "*(+(1, 2), 3)");
    assert_eq!(single_expr("()"), "<>");
    assert_eq!(single_expr("(a,)"), "<a>");
    assert_eq!(single_expr("(a, 'b', 3)"), r#"<a, "b", 3>"#);
}

#[test]
fn for_with_tuple_pattern() {
    assert_eq!(
        dump("{% for i, (a, b) in pairs %}x{% endfor %}"),
        vec![r#"for <i, <a, b>> in pairs ["text \"x\""]"#]
    );
}

#[test]
fn join_statement() {
    assert_eq!(
        dump("{% join x in xs with ', ' %}{{x}}{% endjoin %}"),
        vec![r#"join x in xs with ", " ["expr x"]"#]
    );
}

#[test]
fn if_elif_else() {
    assert_eq!(
        dump("{% if a %}1{% elif b %}2{% else %}3{% endif %}"),
        vec![r#"if [a => ["text \"1\""]; b => ["text \"2\""]; else => ["text \"3\""]]"#]
    );
}

#[test]
fn setindent_and_noindent() {
    assert_eq!(
        dump("{% setindent 2 %}a{% endsetindent %}{% noindent %}b{% endnoindent %}"),
        vec![
            r#"setindent 2 ["text \"a\""]"#,
            r#"setindent 0 ["text \"b\""]"#
        ]
    );
}

#[test]
fn nested_blocks() {
    assert_eq!(
        dump("{% for a in xs %}{% if a %}{{a}}{% endif %}{% endfor %}"),
        vec![r#"for a in xs ["if [a => [\"expr a\"]]"]"#]
    );
}

#[test]
fn operator_callee_spans_cover_operator() {
    let template = parse_ok("{{ a + b }}");
    let stmt = template.arena.body(template.root)[0];
    let StmtKind::Expression(call) = template.arena.stmt(stmt).kind else {
        panic!("expected expression");
    };
    let ExprKind::Call { callee, .. } = &template.arena.expr(call).kind else {
        panic!("expected call");
    };
    assert_eq!(template.arena.expr(*callee).span.to_range(), 5..6);
    assert_eq!(template.arena.expr(call).span.to_range(), 3..8);
}

#[test]
fn mismatched_closer_names_expected_set() {
    let error = parse("t", "{% for x in xs %}a{% endif %}").unwrap_err();
    assert_eq!(
        error.to_string(),
        "expected 'for', 'join', 'if', 'setindent', 'noindent' or 'endfor' but got 'endif'"
    );
    assert_eq!(error.span.to_range(), 21..26);
    assert_eq!(error.context, Some(ErrorContext::ForStatement));
}

#[test]
fn unknown_statement_at_top_level() {
    let error = parse("t", "{% while x %}").unwrap_err();
    assert_eq!(
        error.expected(),
        &[
            TokenTag::For,
            TokenTag::Join,
            TokenTag::If,
            TokenTag::SetIndent,
            TokenTag::NoIndent
        ]
    );
}

#[test]
fn unclosed_block_expects_closer() {
    let error = parse("t", "{% if a %}x").unwrap_err();
    assert_eq!(
        error.to_string(),
        "expected 'elif', 'else' or 'endif' but got end of input"
    );
}

#[test]
fn missing_expression_closer() {
    let error = parse("t", "{{ a b }}").unwrap_err();
    assert_eq!(error.to_string(), "expected '}}' but got 'b'");
}

#[test]
fn lex_errors_surface_through_parse() {
    let error = parse("t", "{{ a } }}").unwrap_err();
    assert!(error.lex_error().is_some());
}

#[test]
fn script_assignments() {
    let program = parse_script("  total = len(xs)\n  # comment\n  a, b = b, a; c = 1\n", 10).unwrap();
    let rendered: Vec<String> = program
        .statements
        .iter()
        .map(|stmt| {
            format!(
                "{} = {}",
                stmt.target
                    .map_or("_".to_string(), |t| pattern(&program.arena, t)),
                expr(&program.arena, stmt.value)
            )
        })
        .collect();
    assert_eq!(rendered, vec!["total = len(xs)", "<a, b> = <b, a>", "c = 1"]);
    assert_eq!(program.statements[0].span.start, 12);
}

#[test]
fn script_bare_expression() {
    let program = parse_script("f(1)", 0).unwrap();
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.statements[0].target, None);
}

#[test]
fn script_rejects_bad_target() {
    let error = parse_script("a + 1 = 2", 0).unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::InvalidAssignTarget);
    assert_eq!(error.context, Some(ErrorContext::Script));
}

#[test]
fn script_error_spans_are_offset() {
    let error = parse_script("a = 1\nb = = 2", 100).unwrap_err();
    assert_eq!(error.span.start, 100 + 6 + 4);
}
