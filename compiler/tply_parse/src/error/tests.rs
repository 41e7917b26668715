use pretty_assertions::assert_eq;
use tply_diagnostic::ErrorCode;
use tply_ir::{Span, TokenTag};
use tply_lexer::LexError;

use super::*;

#[test]
fn expected_list_reads_naturally() {
    let span = Span::new(0, 1);
    let one = ParseError::unexpected(span, [TokenTag::CloseExpr], TokenTag::Ident, "'x'");
    assert_eq!(one.to_string(), "expected '}}' but got 'x'");

    let two = ParseError::unexpected(span, [TokenTag::Ident, TokenTag::LParen], TokenTag::Int, "'3'");
    assert_eq!(two.to_string(), "expected an identifier or '(' but got '3'");

    let three = ParseError::unexpected(
        span,
        [TokenTag::For, TokenTag::If, TokenTag::EndFor],
        TokenTag::EndIf,
        "'endif'",
    );
    assert_eq!(three.to_string(), "expected 'for', 'if' or 'endfor' but got 'endif'");
}

#[test]
fn expected_set_is_deduplicated() {
    let error = ParseError::unexpected(
        Span::DUMMY,
        [TokenTag::EndIf, TokenTag::EndIf, TokenTag::Else],
        TokenTag::Eof,
        "end of input",
    );
    assert_eq!(error.expected(), &[TokenTag::EndIf, TokenTag::Else]);
}

#[test]
fn codes_by_found_token() {
    let span = Span::DUMMY;
    let eof = ParseError::unexpected(span, [TokenTag::EndFor], TokenTag::Eof, "end of input");
    let closer = ParseError::unexpected(span, [TokenTag::EndFor], TokenTag::EndIf, "'endif'");
    let other = ParseError::unexpected(span, [TokenTag::Ident], TokenTag::Int, "'1'");
    assert_eq!(eof.code(), ErrorCode::E1003);
    assert_eq!(closer.code(), ErrorCode::E1002);
    assert_eq!(other.code(), ErrorCode::E1001);
}

#[test]
fn lex_errors_round_trip() {
    let lex = LexError::malformed_closer(Span::new(4, 5));
    let error = ParseError::from(lex.clone());
    assert_eq!(error.lex_error(), Some(lex));
    assert_eq!(error.code(), ErrorCode::E0002);
    assert_eq!(error.to_string(), "got an unexpected '}'");
}

#[test]
fn context_becomes_note() {
    let error = ParseError::unexpected(Span::DUMMY, [TokenTag::In], TokenTag::CloseStmt, "'%}'")
        .in_context(ErrorContext::ForStatement);
    let diagnostic = error.to_diagnostic();
    assert_eq!(diagnostic.notes, vec!["while parsing a for statement".to_string()]);
}
