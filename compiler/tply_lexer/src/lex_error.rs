//! Scan errors.

use std::fmt;

use tply_diagnostic::{Diagnostic, ErrorCode};
use tply_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character that starts no token.
    UnexpectedCharacter { found: char },
    /// A lone `}` inside `{{ }}` or `{% %}`.
    MalformedCloser,
    UnterminatedString,
    /// `{!` with no `!}` before the end of input.
    UnterminatedScript,
    /// Operator characters that form no known operator.
    UnknownOperator { op: String },
    IntOverflow,
}

impl LexError {
    #[cold]
    pub fn unexpected_character(span: Span, found: char) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnexpectedCharacter { found },
        }
    }

    #[cold]
    pub fn malformed_closer(span: Span) -> Self {
        LexError {
            span,
            kind: LexErrorKind::MalformedCloser,
        }
    }

    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnterminatedString,
        }
    }

    #[cold]
    pub fn unterminated_script(span: Span) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnterminatedScript,
        }
    }

    #[cold]
    pub fn unknown_operator(span: Span, op: impl Into<String>) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnknownOperator { op: op.into() },
        }
    }

    #[cold]
    pub fn int_overflow(span: Span) -> Self {
        LexError {
            span,
            kind: LexErrorKind::IntOverflow,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnexpectedCharacter { .. } => ErrorCode::E0001,
            LexErrorKind::MalformedCloser => ErrorCode::E0002,
            LexErrorKind::UnterminatedString => ErrorCode::E0003,
            LexErrorKind::UnterminatedScript => ErrorCode::E0004,
            LexErrorKind::UnknownOperator { .. } => ErrorCode::E0005,
            LexErrorKind::IntOverflow => ErrorCode::E0006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.kind {
            LexErrorKind::UnterminatedScript => "script block opened here",
            LexErrorKind::UnterminatedString => "string starts here",
            _ => "",
        };
        let diagnostic = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span, label);
        match self.kind {
            LexErrorKind::MalformedCloser => {
                diagnostic.with_note("embedded syntax is closed with '}}' or '%}'")
            }
            LexErrorKind::UnterminatedScript => {
                diagnostic.with_note("script blocks run until the first '!}'")
            }
            _ => diagnostic,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnexpectedCharacter { found } => {
                write!(f, "got an unexpected character {found:?}")
            }
            LexErrorKind::MalformedCloser => f.write_str("got an unexpected '}'"),
            LexErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
            LexErrorKind::UnterminatedScript => {
                f.write_str("unterminated script block, expected '!}'")
            }
            LexErrorKind::UnknownOperator { op } => write!(f, "unrecognized operator '{op}'"),
            LexErrorKind::IntOverflow => f.write_str("integer literal is too large"),
        }
    }
}

impl std::error::Error for LexError {}
