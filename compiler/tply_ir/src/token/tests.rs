use pretty_assertions::assert_eq;

use super::*;

#[test]
fn tags_drop_payloads() {
    assert_eq!(TokenKind::Ident("x".into()).tag(), TokenTag::Ident);
    assert_eq!(TokenKind::Int(3).tag(), TokenTag::Int);
    assert_eq!(TokenKind::EndFor.tag(), TokenTag::EndFor);
}

#[test]
fn descriptions_quote_symbols() {
    assert_eq!(TokenTag::CloseExpr.to_string(), "'}}'");
    assert_eq!(TokenTag::EndJoin.description(), "'endjoin'");
    assert_eq!(TokenTag::Eof.description(), "end of input");
}

#[test]
fn display_name_shows_payload() {
    assert_eq!(TokenKind::Ident("foo".into()).display_name(), "'foo'");
    assert_eq!(TokenKind::Int(42).display_name(), "'42'");
    assert_eq!(TokenKind::Str("a".into()).display_name(), "string \"a\"");
    assert_eq!(TokenKind::EndIf.display_name(), "'endif'");
}

#[test]
fn operator_symbols() {
    assert_eq!(TokenTag::PipeGt.operator_symbol(), Some("|>"));
    assert_eq!(TokenTag::In.operator_symbol(), Some("in"));
    assert_eq!(TokenTag::Not.operator_symbol(), Some("not"));
    assert_eq!(TokenTag::For.operator_symbol(), None);
}
