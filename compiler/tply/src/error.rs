//! The error type of the public API.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tply_diagnostic::{Diagnostic, ErrorCode};
use tply_eval::EvalError;
use tply_ir::{SourceFile, Span};
use tply_lexer::LexError;
use tply_parse::ParseError;

/// A resolved source position. `line` and `column` are 1-based; columns
/// count characters.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    fn resolve(source: &SourceFile, span: Span) -> Self {
        let position = source.position(span.start);
        Location {
            file: source.name().to_string(),
            line: position.line,
            column: position.column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// The first failure of a compile or render. Nothing is rendered when
/// any phase fails.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("{location}: {error}")]
    Scan {
        error: LexError,
        location: Location,
        file: Arc<SourceFile>,
    },
    #[error("{location}: {error}")]
    Parse {
        error: ParseError,
        location: Location,
        file: Arc<SourceFile>,
    },
    /// `location` is `None` when the failure has no span, e.g. a value
    /// that could not be converted.
    #[error("{}: {error}", at(.location, .file))]
    Eval {
        error: EvalError,
        location: Option<Location>,
        file: Arc<SourceFile>,
    },
}

fn at(location: &Option<Location>, file: &SourceFile) -> String {
    match location {
        Some(location) => location.to_string(),
        None => file.name().to_string(),
    }
}

impl Error {
    #[cold]
    pub(crate) fn parse(error: ParseError, name: &str, source: &str) -> Self {
        let file = Arc::new(SourceFile::new(name, source));
        let location = Location::resolve(&file, error.span);
        match error.lex_error() {
            Some(error) => Error::Scan { error, location, file },
            None => Error::Parse { error, location, file },
        }
    }

    #[cold]
    pub(crate) fn eval(error: EvalError, source: &SourceFile) -> Self {
        let location = error.span.map(|span| Location::resolve(source, span));
        Error::Eval {
            error,
            location,
            file: Arc::new(source.clone()),
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Error::Scan { location, .. } | Error::Parse { location, .. } => Some(location),
            Error::Eval { location, .. } => location.as_ref(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Scan { error, .. } => error.code(),
            Error::Parse { error, .. } => error.code(),
            Error::Eval { error, .. } => error.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Scan { error, .. } => error.to_diagnostic(),
            Error::Parse { error, .. } => error.to_diagnostic(),
            Error::Eval { error, .. } => error.to_diagnostic(),
        }
    }

    /// The diagnostic with a snippet of the offending line.
    pub fn render(&self) -> String {
        let (Error::Scan { file, .. } | Error::Parse { file, .. } | Error::Eval { file, .. }) = self;
        tply_diagnostic::render(&self.to_diagnostic(), file)
    }
}
