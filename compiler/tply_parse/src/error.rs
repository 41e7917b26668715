//! Parse errors.
//!
//! Unexpected-token errors carry the full expected set so the message can
//! name every token that would have been accepted at that point.

use std::fmt;

use tply_diagnostic::{Diagnostic, ErrorCode};
use tply_ir::{Span, TokenTag};
use tply_lexer::{LexError, LexErrorKind};

/// What the parser was working on when it failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorContext {
    Template,
    Expression,
    IfStatement,
    ForStatement,
    JoinStatement,
    SetIndentStatement,
    Pattern,
    Script,
}

impl ErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::Template => "the template body",
            ErrorContext::Expression => "an expression",
            ErrorContext::IfStatement => "an if statement",
            ErrorContext::ForStatement => "a for statement",
            ErrorContext::JoinStatement => "a join statement",
            ErrorContext::SetIndentStatement => "a setindent statement",
            ErrorContext::Pattern => "a loop pattern",
            ErrorContext::Script => "a script block",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// The scanner failed while the parser was pulling tokens.
    Lex(LexErrorKind),
    UnexpectedToken {
        expected: Vec<TokenTag>,
        found: TokenTag,
        /// Rendered form of the offending token, payload included.
        found_text: String,
    },
    /// Left side of a script `=` is not a name or tuple of names.
    InvalidAssignTarget,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub span: Span,
    pub kind: ParseErrorKind,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    #[cold]
    pub fn unexpected(
        span: Span,
        expected: impl IntoIterator<Item = TokenTag>,
        found: TokenTag,
        found_text: impl Into<String>,
    ) -> Self {
        let mut tags: Vec<TokenTag> = Vec::new();
        for tag in expected {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        ParseError {
            span,
            kind: ParseErrorKind::UnexpectedToken {
                expected: tags,
                found,
                found_text: found_text.into(),
            },
            context: None,
        }
    }

    #[cold]
    pub fn invalid_assign_target(span: Span) -> Self {
        ParseError {
            span,
            kind: ParseErrorKind::InvalidAssignTarget,
            context: None,
        }
    }

    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    /// The scanner error this wraps, if it came from the lexer.
    pub fn lex_error(&self) -> Option<LexError> {
        match &self.kind {
            ParseErrorKind::Lex(kind) => Some(LexError {
                span: self.span,
                kind: kind.clone(),
            }),
            _ => None,
        }
    }

    pub fn expected(&self) -> &[TokenTag] {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. } => expected,
            _ => &[],
        }
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            ParseErrorKind::Lex(_) => self
                .lex_error()
                .map_or(ErrorCode::E0001, |error| error.code()),
            ParseErrorKind::UnexpectedToken { found, .. } if *found == TokenTag::Eof => {
                ErrorCode::E1003
            }
            ParseErrorKind::UnexpectedToken { found, .. } if is_closing_keyword(*found) => {
                ErrorCode::E1002
            }
            ParseErrorKind::UnexpectedToken { .. } | ParseErrorKind::InvalidAssignTarget => {
                ErrorCode::E1001
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        if let Some(lex) = self.lex_error() {
            return lex.to_diagnostic();
        }
        let diagnostic = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span, "unexpected here");
        match self.context {
            Some(context) => diagnostic.with_note(format!("while parsing {}", context.description())),
            None => diagnostic,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        ParseError {
            span: error.span,
            kind: ParseErrorKind::Lex(error.kind),
            context: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Lex(_) => match self.lex_error() {
                Some(error) => write!(f, "{error}"),
                None => Ok(()),
            },
            ParseErrorKind::UnexpectedToken {
                expected,
                found_text,
                ..
            } => write!(f, "expected {} but got {found_text}", one_of(expected)),
            ParseErrorKind::InvalidAssignTarget => {
                f.write_str("only names and tuples of names can be assigned to")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// `a`, `a or b`, `a, b or c`.
fn one_of(tags: &[TokenTag]) -> String {
    match tags {
        [] => "nothing".to_string(),
        [only] => only.description().to_string(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(|tag| tag.description()).collect();
            format!("{} or {}", init.join(", "), last.description())
        }
    }
}

pub(crate) fn is_closing_keyword(tag: TokenTag) -> bool {
    matches!(
        tag,
        TokenTag::EndFor
            | TokenTag::EndJoin
            | TokenTag::EndIf
            | TokenTag::Elif
            | TokenTag::Else
            | TokenTag::EndSetIndent
            | TokenTag::EndNoIndent
            | TokenTag::EndWhile
            | TokenTag::EndDedent
    )
}

#[cfg(test)]
mod tests;
