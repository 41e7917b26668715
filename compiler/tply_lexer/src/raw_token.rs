//! Embedded-syntax tokens recognised by logos.
//!
//! Only the regions between `{{ }}` and `{% %}` (and whole script bodies in
//! code-only mode) go through this table. Text mode, comments and raw script
//! capture are scanned by hand in the parent module.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    // Closers
    #[token("}}")]
    CloseExpr,
    #[token("%}")]
    CloseStmt,
    #[token("!}")]
    CloseScript,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Assign,

    // Operators, longest match wins
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token("%")]
    Percent,
    #[token("@")]
    At,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("|>")]
    PipeGt,

    // Named operators
    #[token("not")]
    Not,
    #[token("and")]
    And,
    #[token("or")]
    Or,

    // Keywords
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("while")]
    While,
    #[token("endfor")]
    EndFor,
    #[token("endwhile")]
    EndWhile,
    #[token("join")]
    Join,
    #[token("endjoin")]
    EndJoin,
    #[token("with")]
    With,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("elif")]
    Elif,
    #[token("endif")]
    EndIf,
    #[token("noindent")]
    NoIndent,
    #[token("endnoindent")]
    EndNoIndent,
    #[token("setindent")]
    SetIndent,
    #[token("endsetindent")]
    EndSetIndent,
    #[token("dedent")]
    Dedent,
    #[token("enddedent")]
    EndDedent,

    // Literals
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"'([^'\\]|\\(.|\n))*'")]
    SingleQuoted,
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    DoubleQuoted,
}
