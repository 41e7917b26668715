//! Lexer output: tokens, their payloads, and payload-free tags.

use std::fmt;

use crate::Span;

/// A token with its source range.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    #[inline]
    pub fn tag(&self) -> TokenTag {
        self.kind.tag()
    }
}

/// Token kinds. Literal-bearing kinds own their decoded payload.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TokenKind {
    // Text mode
    Text(String),
    Comment(String),
    Script(String),

    // Delimiters
    OpenExpr,
    CloseExpr,
    OpenStmt,
    CloseStmt,
    OpenScript,
    CloseScript,

    // Literals and names
    Ident(String),
    Str(String),
    Int(i64),

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Dot,
    Semicolon,
    Assign,

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    At,
    Shl,
    Shr,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    PipeGt,
    Not,
    And,
    Or,

    // Keywords
    For,
    In,
    While,
    EndFor,
    EndWhile,
    Join,
    EndJoin,
    With,
    If,
    Else,
    Elif,
    EndIf,
    NoIndent,
    EndNoIndent,
    SetIndent,
    EndSetIndent,
    Dedent,
    EndDedent,

    Eof,
}

/// Payload-free discriminant of a [`TokenKind`], used for expected sets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenTag {
    Text,
    Comment,
    Script,
    OpenExpr,
    CloseExpr,
    OpenStmt,
    CloseStmt,
    OpenScript,
    CloseScript,
    Ident,
    Str,
    Int,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Dot,
    Semicolon,
    Assign,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    At,
    Shl,
    Shr,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    PipeGt,
    Not,
    And,
    Or,
    For,
    In,
    While,
    EndFor,
    EndWhile,
    Join,
    EndJoin,
    With,
    If,
    Else,
    Elif,
    EndIf,
    NoIndent,
    EndNoIndent,
    SetIndent,
    EndSetIndent,
    Dedent,
    EndDedent,
    Eof,
}

impl TokenKind {
    pub fn tag(&self) -> TokenTag {
        match self {
            TokenKind::Text(_) => TokenTag::Text,
            TokenKind::Comment(_) => TokenTag::Comment,
            TokenKind::Script(_) => TokenTag::Script,
            TokenKind::OpenExpr => TokenTag::OpenExpr,
            TokenKind::CloseExpr => TokenTag::CloseExpr,
            TokenKind::OpenStmt => TokenTag::OpenStmt,
            TokenKind::CloseStmt => TokenTag::CloseStmt,
            TokenKind::OpenScript => TokenTag::OpenScript,
            TokenKind::CloseScript => TokenTag::CloseScript,
            TokenKind::Ident(_) => TokenTag::Ident,
            TokenKind::Str(_) => TokenTag::Str,
            TokenKind::Int(_) => TokenTag::Int,
            TokenKind::LParen => TokenTag::LParen,
            TokenKind::RParen => TokenTag::RParen,
            TokenKind::LBracket => TokenTag::LBracket,
            TokenKind::RBracket => TokenTag::RBracket,
            TokenKind::Comma => TokenTag::Comma,
            TokenKind::Colon => TokenTag::Colon,
            TokenKind::Dot => TokenTag::Dot,
            TokenKind::Semicolon => TokenTag::Semicolon,
            TokenKind::Assign => TokenTag::Assign,
            TokenKind::Plus => TokenTag::Plus,
            TokenKind::Minus => TokenTag::Minus,
            TokenKind::Star => TokenTag::Star,
            TokenKind::StarStar => TokenTag::StarStar,
            TokenKind::Slash => TokenTag::Slash,
            TokenKind::SlashSlash => TokenTag::SlashSlash,
            TokenKind::Percent => TokenTag::Percent,
            TokenKind::At => TokenTag::At,
            TokenKind::Shl => TokenTag::Shl,
            TokenKind::Shr => TokenTag::Shr,
            TokenKind::Amp => TokenTag::Amp,
            TokenKind::Pipe => TokenTag::Pipe,
            TokenKind::Caret => TokenTag::Caret,
            TokenKind::Tilde => TokenTag::Tilde,
            TokenKind::Lt => TokenTag::Lt,
            TokenKind::Gt => TokenTag::Gt,
            TokenKind::LtEq => TokenTag::LtEq,
            TokenKind::GtEq => TokenTag::GtEq,
            TokenKind::EqEq => TokenTag::EqEq,
            TokenKind::NotEq => TokenTag::NotEq,
            TokenKind::PipeGt => TokenTag::PipeGt,
            TokenKind::Not => TokenTag::Not,
            TokenKind::And => TokenTag::And,
            TokenKind::Or => TokenTag::Or,
            TokenKind::For => TokenTag::For,
            TokenKind::In => TokenTag::In,
            TokenKind::While => TokenTag::While,
            TokenKind::EndFor => TokenTag::EndFor,
            TokenKind::EndWhile => TokenTag::EndWhile,
            TokenKind::Join => TokenTag::Join,
            TokenKind::EndJoin => TokenTag::EndJoin,
            TokenKind::With => TokenTag::With,
            TokenKind::If => TokenTag::If,
            TokenKind::Else => TokenTag::Else,
            TokenKind::Elif => TokenTag::Elif,
            TokenKind::EndIf => TokenTag::EndIf,
            TokenKind::NoIndent => TokenTag::NoIndent,
            TokenKind::EndNoIndent => TokenTag::EndNoIndent,
            TokenKind::SetIndent => TokenTag::SetIndent,
            TokenKind::EndSetIndent => TokenTag::EndSetIndent,
            TokenKind::Dedent => TokenTag::Dedent,
            TokenKind::EndDedent => TokenTag::EndDedent,
            TokenKind::Eof => TokenTag::Eof,
        }
    }

    /// Short human-readable rendering for "but got ..." messages.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Text(text) => format!("text {text:?}"),
            TokenKind::Comment(_) => "a comment".to_string(),
            TokenKind::Script(_) => "a script body".to_string(),
            TokenKind::Ident(name) => format!("'{name}'"),
            TokenKind::Str(value) => format!("string {value:?}"),
            TokenKind::Int(value) => format!("'{value}'"),
            other => other.tag().description().to_string(),
        }
    }
}

impl TokenTag {
    /// How the tag reads in an "expected one of" list.
    pub fn description(self) -> &'static str {
        match self {
            TokenTag::Text => "text",
            TokenTag::Comment => "a comment",
            TokenTag::Script => "a script body",
            TokenTag::OpenExpr => "'{{'",
            TokenTag::CloseExpr => "'}}'",
            TokenTag::OpenStmt => "'{%'",
            TokenTag::CloseStmt => "'%}'",
            TokenTag::OpenScript => "'{!'",
            TokenTag::CloseScript => "'!}'",
            TokenTag::Ident => "an identifier",
            TokenTag::Str => "a string",
            TokenTag::Int => "an integer",
            TokenTag::LParen => "'('",
            TokenTag::RParen => "')'",
            TokenTag::LBracket => "'['",
            TokenTag::RBracket => "']'",
            TokenTag::Comma => "','",
            TokenTag::Colon => "':'",
            TokenTag::Dot => "'.'",
            TokenTag::Semicolon => "';'",
            TokenTag::Assign => "'='",
            TokenTag::Plus => "'+'",
            TokenTag::Minus => "'-'",
            TokenTag::Star => "'*'",
            TokenTag::StarStar => "'**'",
            TokenTag::Slash => "'/'",
            TokenTag::SlashSlash => "'//'",
            TokenTag::Percent => "'%'",
            TokenTag::At => "'@'",
            TokenTag::Shl => "'<<'",
            TokenTag::Shr => "'>>'",
            TokenTag::Amp => "'&'",
            TokenTag::Pipe => "'|'",
            TokenTag::Caret => "'^'",
            TokenTag::Tilde => "'~'",
            TokenTag::Lt => "'<'",
            TokenTag::Gt => "'>'",
            TokenTag::LtEq => "'<='",
            TokenTag::GtEq => "'>='",
            TokenTag::EqEq => "'=='",
            TokenTag::NotEq => "'!='",
            TokenTag::PipeGt => "'|>'",
            TokenTag::Not => "'not'",
            TokenTag::And => "'and'",
            TokenTag::Or => "'or'",
            TokenTag::For => "'for'",
            TokenTag::In => "'in'",
            TokenTag::While => "'while'",
            TokenTag::EndFor => "'endfor'",
            TokenTag::EndWhile => "'endwhile'",
            TokenTag::Join => "'join'",
            TokenTag::EndJoin => "'endjoin'",
            TokenTag::With => "'with'",
            TokenTag::If => "'if'",
            TokenTag::Else => "'else'",
            TokenTag::Elif => "'elif'",
            TokenTag::EndIf => "'endif'",
            TokenTag::NoIndent => "'noindent'",
            TokenTag::EndNoIndent => "'endnoindent'",
            TokenTag::SetIndent => "'setindent'",
            TokenTag::EndSetIndent => "'endsetindent'",
            TokenTag::Dedent => "'dedent'",
            TokenTag::EndDedent => "'enddedent'",
            TokenTag::Eof => "end of input",
        }
    }

    /// Operator symbol under which an operator is bound in the prelude.
    ///
    /// Returns `None` for tags that are not operators.
    pub fn operator_symbol(self) -> Option<&'static str> {
        Some(match self {
            TokenTag::Plus => "+",
            TokenTag::Minus => "-",
            TokenTag::Star => "*",
            TokenTag::StarStar => "**",
            TokenTag::Slash => "/",
            TokenTag::SlashSlash => "//",
            TokenTag::Percent => "%",
            TokenTag::At => "@",
            TokenTag::Shl => "<<",
            TokenTag::Shr => ">>",
            TokenTag::Amp => "&",
            TokenTag::Pipe => "|",
            TokenTag::Caret => "^",
            TokenTag::Tilde => "~",
            TokenTag::Lt => "<",
            TokenTag::Gt => ">",
            TokenTag::LtEq => "<=",
            TokenTag::GtEq => ">=",
            TokenTag::EqEq => "==",
            TokenTag::NotEq => "!=",
            TokenTag::PipeGt => "|>",
            TokenTag::Not => "not",
            TokenTag::And => "and",
            TokenTag::Or => "or",
            TokenTag::In => "in",
            _ => return None,
        })
    }
}

impl fmt::Display for TokenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests;
