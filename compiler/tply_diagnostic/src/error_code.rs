use std::fmt;

/// Error codes for all template diagnostics.
///
/// Format: E#### where the first digit is the phase:
/// - E0xxx: scan errors
/// - E1xxx: parse errors
/// - E2xxx: evaluation errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Scan (E0xxx)
    /// Character that cannot start any token
    E0001,
    /// `}` not followed by `}`
    E0002,
    /// String literal missing its closing quote
    E0003,
    /// `{!` without a matching `!}`
    E0004,
    /// Operator characters that form no known operator
    E0005,
    /// Integer literal out of range
    E0006,

    // Parse (E1xxx)
    /// Unexpected token
    E1001,
    /// Block closed by the wrong keyword
    E1002,
    /// Input ended inside an open block
    E1003,

    // Evaluation (E2xxx)
    /// Undefined variable
    E2001,
    /// Call target is not callable
    E2002,
    /// Script block failed
    E2003,
    /// Destructuring arity mismatch
    E2004,
    /// Operand or argument of the wrong type
    E2005,
    /// Index or key not present
    E2006,
    /// Wrong number of arguments
    E2007,
    /// Arithmetic failure
    E2008,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
        }
    }

    pub fn is_scan_error(self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parse_error(self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_eval_error(self) -> bool {
        self.as_str().starts_with("E2")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
