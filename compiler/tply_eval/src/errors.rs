//! Evaluation errors and their constructors.
//!
//! Constructors are free functions so call sites read as
//! `return Err(undefined_variable(name))`. Errors are created without a span;
//! the interpreter attaches the span of the innermost expression that failed
//! with [`EvalError::with_span`].

use std::fmt;

use tply_diagnostic::{Diagnostic, ErrorCode};
use tply_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EvalErrorKind {
    UndefinedVariable { name: String },
    NotCallable { type_name: &'static str },
    /// A script block failed, or scripts are disabled.
    ScriptFailed { message: String },
    /// A tuple pattern met a sequence of another length.
    PatternArity { expected: usize, got: usize },
    /// A tuple pattern met something that is not a sequence.
    NotDestructurable { type_name: &'static str },
    NotIterable { type_name: &'static str },
    TypeMismatch { operation: String, types: String },
    InvalidArgument { message: String },
    IndexOutOfBounds { index: i64, len: usize },
    KeyNotFound { key: String },
    NoSuchMember { name: String, type_name: &'static str },
    WrongArgCount { name: String, expected: String, got: usize },
    DivisionByZero,
    Overflow { operation: &'static str },
    InvalidIndentLevel { got: String },
}

impl EvalError {
    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach `span` unless a more precise one is already present.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::E2001,
            EvalErrorKind::NotCallable { .. } => ErrorCode::E2002,
            EvalErrorKind::ScriptFailed { .. } => ErrorCode::E2003,
            EvalErrorKind::PatternArity { .. } | EvalErrorKind::NotDestructurable { .. } => {
                ErrorCode::E2004
            }
            EvalErrorKind::NotIterable { .. }
            | EvalErrorKind::TypeMismatch { .. }
            | EvalErrorKind::InvalidArgument { .. }
            | EvalErrorKind::InvalidIndentLevel { .. } => ErrorCode::E2005,
            EvalErrorKind::IndexOutOfBounds { .. }
            | EvalErrorKind::KeyNotFound { .. }
            | EvalErrorKind::NoSuchMember { .. } => ErrorCode::E2006,
            EvalErrorKind::WrongArgCount { .. } => ErrorCode::E2007,
            EvalErrorKind::DivisionByZero | EvalErrorKind::Overflow { .. } => ErrorCode::E2008,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.to_string());
        let diagnostic = match self.span {
            Some(span) => diagnostic.with_label(span, ""),
            None => diagnostic,
        };
        match &self.kind {
            EvalErrorKind::UndefinedVariable { .. } => {
                diagnostic.with_note("names are looked up in the loop scopes, then the bindings, then the builtins")
            }
            EvalErrorKind::InvalidIndentLevel { .. } => {
                diagnostic.with_note("setindent takes a non-negative integer")
            }
            _ => diagnostic,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EvalErrorKind::UndefinedVariable { name } => {
                write!(f, "variable '{name}' is not defined")
            }
            EvalErrorKind::NotCallable { type_name } => {
                write!(f, "a value of type {type_name} is not callable")
            }
            EvalErrorKind::ScriptFailed { message } => write!(f, "script block failed: {message}"),
            EvalErrorKind::PatternArity { expected, got } => {
                write!(f, "cannot unpack {got} values into a pattern of {expected}")
            }
            EvalErrorKind::NotDestructurable { type_name } => {
                write!(f, "cannot unpack a value of type {type_name}")
            }
            EvalErrorKind::NotIterable { type_name } => {
                write!(f, "a value of type {type_name} is not iterable")
            }
            EvalErrorKind::TypeMismatch { operation, types } => {
                write!(f, "unsupported operand types for {operation}: {types}")
            }
            EvalErrorKind::InvalidArgument { message } => f.write_str(message),
            EvalErrorKind::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} is out of range for length {len}")
            }
            EvalErrorKind::KeyNotFound { key } => write!(f, "key '{key}' not found"),
            EvalErrorKind::NoSuchMember { name, type_name } => {
                write!(f, "a value of type {type_name} has no member '{name}'")
            }
            EvalErrorKind::WrongArgCount {
                name,
                expected,
                got,
            } => write!(f, "{name}() takes {expected} arguments but {got} were given"),
            EvalErrorKind::DivisionByZero => f.write_str("division by zero"),
            EvalErrorKind::Overflow { operation } => write!(f, "integer overflow in {operation}"),
            EvalErrorKind::InvalidIndentLevel { got } => {
                write!(f, "indent level must be a non-negative integer, got {got}")
            }
        }
    }
}

impl std::error::Error for EvalError {}

// Names and calls

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: impl Into<String>, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgCount {
        name: name.to_string(),
        expected: expected.into(),
        got,
    })
}

#[cold]
pub fn script_failed(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScriptFailed {
        message: message.into(),
    })
}

// Patterns and iteration

#[cold]
pub fn pattern_arity(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PatternArity { expected, got })
}

#[cold]
pub fn not_destructurable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotDestructurable { type_name })
}

#[cold]
pub fn not_iterable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable { type_name })
}

// Operands and arguments

#[cold]
pub fn type_mismatch(operation: &str, types: &[&'static str]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        operation: format!("'{operation}'"),
        types: types.join(" and "),
    })
}

#[cold]
pub fn invalid_argument(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        message: message.into(),
    })
}

#[cold]
pub fn invalid_indent_level(got: String) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndentLevel { got })
}

// Lookups

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

#[cold]
pub fn no_such_member(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMember {
        name: name.to_string(),
        type_name,
    })
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Overflow { operation })
}
