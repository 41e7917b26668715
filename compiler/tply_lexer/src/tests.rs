use pretty_assertions::assert_eq;
use tply_ir::{Span, TokenKind};

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn code_kinds(source: &str) -> Vec<TokenKind> {
    Scanner::code(source).map(|t| t.unwrap().kind).collect()
}

fn text(s: &str) -> TokenKind {
    TokenKind::Text(s.to_string())
}

fn ident(s: &str) -> TokenKind {
    TokenKind::Ident(s.to_string())
}

#[test]
fn plain_text_is_one_token() {
    assert_eq!(kinds("hello\n  world 🐀"), vec![text("hello\n  world 🐀"), TokenKind::Eof]);
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn lone_braces_stay_text() {
    assert_eq!(kinds("{ a } {x"), vec![text("{ a } {x"), TokenKind::Eof]);
}

#[test]
fn expression_switches_modes() {
    assert_eq!(
        kinds("a {{ name }} b"),
        vec![
            text("a "),
            TokenKind::OpenExpr,
            ident("name"),
            TokenKind::CloseExpr,
            text(" b"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn statement_keywords_and_idents() {
    assert_eq!(
        kinds("{% for item in items %}{% endfor %}"),
        vec![
            TokenKind::OpenStmt,
            TokenKind::For,
            ident("item"),
            TokenKind::In,
            ident("items"),
            TokenKind::CloseStmt,
            TokenKind::OpenStmt,
            TokenKind::EndFor,
            TokenKind::CloseStmt,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keyword_prefixes_are_identifiers() {
    assert_eq!(
        code_kinds("index format iffy endform"),
        vec![
            ident("index"),
            ident("format"),
            ident("iffy"),
            ident("endform"),
            TokenKind::Eof
        ]
    );
}

#[test]
fn operators_match_longest_prefix() {
    assert_eq!(
        code_kinds("** * // / <= << < >= >> > == != |> | % @ ~ ^ &"),
        vec![
            TokenKind::StarStar,
            TokenKind::Star,
            TokenKind::SlashSlash,
            TokenKind::Slash,
            TokenKind::LtEq,
            TokenKind::Shl,
            TokenKind::Lt,
            TokenKind::GtEq,
            TokenKind::Shr,
            TokenKind::Gt,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::PipeGt,
            TokenKind::Pipe,
            TokenKind::Percent,
            TokenKind::At,
            TokenKind::Tilde,
            TokenKind::Caret,
            TokenKind::Amp,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn named_operators() {
    assert_eq!(
        code_kinds("not a and b or c"),
        vec![
            TokenKind::Not,
            ident("a"),
            TokenKind::And,
            ident("b"),
            TokenKind::Or,
            ident("c"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn percent_before_brace_closes_statement() {
    assert_eq!(
        kinds("{% if a %}x"),
        vec![
            TokenKind::OpenStmt,
            TokenKind::If,
            ident("a"),
            TokenKind::CloseStmt,
            text("x"),
            TokenKind::Eof,
        ]
    );
    assert_eq!(code_kinds("a % b"), vec![ident("a"), TokenKind::Percent, ident("b"), TokenKind::Eof]);
}

#[test]
fn string_literals_decode_escapes() {
    assert_eq!(
        code_kinds(r#"'a\'b' "c\nd" 'x\qy' "it's""#),
        vec![
            TokenKind::Str("a'b".into()),
            TokenKind::Str("c\nd".into()),
            TokenKind::Str("xqy".into()),
            TokenKind::Str("it's".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn integers() {
    assert_eq!(code_kinds("0 42"), vec![TokenKind::Int(0), TokenKind::Int(42), TokenKind::Eof]);
}

#[test]
fn comments_nest() {
    assert_eq!(
        kinds("a{# one {# two #} still #}b"),
        vec![
            text("a"),
            TokenKind::Comment(" one {# two #} still ".into()),
            text("b"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unclosed_comment_runs_to_end() {
    assert_eq!(
        kinds("a{# open"),
        vec![text("a"), TokenKind::Comment(" open".into()), TokenKind::Eof]
    );
}

#[test]
fn script_body_is_verbatim() {
    assert_eq!(
        kinds("{! x = '}}' + y\n  z = 1 !}after"),
        vec![
            TokenKind::OpenScript,
            TokenKind::Script(" x = '}}' + y\n  z = 1 ".into()),
            TokenKind::CloseScript,
            text("after"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_are_byte_ranges() {
    let tokens = tokenize("ab{{ x }}").unwrap();
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 2),
            Span::new(2, 4),
            Span::new(5, 6),
            Span::new(7, 9),
            Span::new(9, 9),
        ]
    );
}

#[test]
fn unterminated_script_points_at_opener() {
    let error = tokenize("ab{! x = 1").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnterminatedScript);
    assert_eq!(error.span, Span::new(2, 4));
}

#[test]
fn unterminated_string() {
    let error = tokenize("{{ 'abc }}").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnterminatedString);
    assert_eq!(error.span.start, 3);
}

#[test]
fn lone_closing_brace_is_malformed() {
    let error = tokenize("{{ a }").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::MalformedCloser);
    assert_eq!(error.span, Span::new(5, 6));
}

#[test]
fn bang_alone_is_unknown_operator() {
    let error = tokenize("{{ !a }}").unwrap_err();
    assert_eq!(
        error.kind,
        LexErrorKind::UnknownOperator { op: "!".into() }
    );
}

#[test]
fn unexpected_character() {
    let error = tokenize("{{ a $ b }}").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter { found: '$' });
    assert_eq!(error.span, Span::new(5, 6));
}

#[test]
fn integer_overflow() {
    let error = tokenize("{{ 99999999999999999999 }}").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::IntOverflow);
}

#[test]
fn iterator_stops_after_error() {
    let mut scanner = Scanner::new("{{ $ }}");
    assert!(matches!(scanner.next(), Some(Ok(_))));
    assert!(matches!(scanner.next(), Some(Err(_))));
    assert!(scanner.next().is_none());
}

#[test]
fn eof_inside_code_region() {
    assert_eq!(kinds("{{ a"), vec![TokenKind::OpenExpr, ident("a"), TokenKind::Eof]);
}

#[test]
fn code_scanner_keeps_closers_as_tokens() {
    assert_eq!(
        code_kinds("a = b; }}"),
        vec![
            ident("a"),
            TokenKind::Assign,
            ident("b"),
            TokenKind::Semicolon,
            TokenKind::CloseExpr,
            TokenKind::Eof,
        ]
    );
}
