//! Lexer for tply templates.
//!
//! [`Scanner`] is a lazy token iterator. It starts in text mode and switches
//! to embedded-syntax mode at `{{` and `{%`, back again at `}}` and `%}`.
//! Script bodies between `{!` and `!}` are captured verbatim, and `{# #}`
//! comments are scanned with nesting depth.
//!
//! A code-only scanner ([`Scanner::code`]) has no text mode. It lexes script
//! bodies against the same embedded-syntax table.

mod escape;
mod lex_error;
mod raw_token;

use logos::Logos;
use memchr::{memchr, memchr2};
use tply_ir::{Span, Token, TokenKind};

pub use lex_error::{LexError, LexErrorKind};

use raw_token::RawToken;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Mode {
    Text,
    Code,
    ScriptBody,
    ScriptClose,
}

/// Lazy scanner over one source string.
pub struct Scanner<'src> {
    source: &'src str,
    pos: usize,
    mode: Mode,
    code_only: bool,
    /// Offset of the last `{!`, for unterminated-script errors.
    script_open: usize,
    finished: bool,
}

impl<'src> Scanner<'src> {
    /// Scanner for a whole template.
    pub fn new(source: &'src str) -> Self {
        Scanner {
            source,
            pos: 0,
            mode: Mode::Text,
            code_only: false,
            script_open: 0,
            finished: false,
        }
    }

    /// Scanner for a script body: embedded syntax only, end of input is a normal end.
    pub fn code(source: &'src str) -> Self {
        Scanner {
            mode: Mode::Code,
            code_only: true,
            ..Scanner::new(source)
        }
    }

    /// Produce the next token. Returns `Eof` forever once the input is consumed.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = match self.mode {
            Mode::Text => self.lex_text(),
            Mode::Code => self.lex_code(),
            Mode::ScriptBody => self.lex_script_body(),
            Mode::ScriptClose => Ok(self.lex_script_close()),
        }?;
        tracing::trace!(kind = ?token.kind, span = %token.span, "token");
        Ok(token)
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::from_range(start..end)
    }

    fn eof(&self) -> Token {
        Token::new(TokenKind::Eof, Span::point(self.span(self.pos, self.pos).start))
    }

    fn lex_text(&mut self) -> Result<Token, LexError> {
        let source = self.source;
        let rest = &source[self.pos..];
        if rest.is_empty() {
            return Ok(self.eof());
        }

        let start = self.pos;
        if rest.starts_with("{{") {
            self.pos += 2;
            self.mode = Mode::Code;
            return Ok(Token::new(TokenKind::OpenExpr, self.span(start, self.pos)));
        }
        if rest.starts_with("{%") {
            self.pos += 2;
            self.mode = Mode::Code;
            return Ok(Token::new(TokenKind::OpenStmt, self.span(start, self.pos)));
        }
        if rest.starts_with("{!") {
            self.pos += 2;
            self.script_open = start;
            self.mode = Mode::ScriptBody;
            return Ok(Token::new(TokenKind::OpenScript, self.span(start, self.pos)));
        }
        if rest.starts_with("{#") {
            return Ok(self.lex_comment());
        }

        let end = find_open_delimiter(rest).unwrap_or(rest.len());
        self.pos += end;
        Ok(Token::new(
            TokenKind::Text(rest[..end].to_string()),
            self.span(start, self.pos),
        ))
    }

    /// Scan a comment starting at `{#`. Nested `{# #}` pairs are tracked by
    /// depth; an unclosed comment runs to the end of input.
    fn lex_comment(&mut self) -> Token {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        let content_start = start + 2;
        let mut i = content_start;
        let mut depth = 1usize;
        let mut content_end = bytes.len();
        let mut end = bytes.len();

        while let Some(offset) = memchr2(b'{', b'#', &bytes[i..]) {
            let at = i + offset;
            if bytes[at..].starts_with(b"{#") {
                depth += 1;
                i = at + 2;
            } else if bytes[at..].starts_with(b"#}") {
                depth -= 1;
                i = at + 2;
                if depth == 0 {
                    content_end = at;
                    end = i;
                    break;
                }
            } else {
                i = at + 1;
            }
        }

        self.pos = end;
        Token::new(
            TokenKind::Comment(self.source[content_start..content_end].to_string()),
            self.span(start, end),
        )
    }

    fn lex_script_body(&mut self) -> Result<Token, LexError> {
        let source = self.source;
        let rest = &source[self.pos..];
        let Some(len) = rest.find("!}") else {
            self.finished = true;
            return Err(LexError::unterminated_script(
                self.span(self.script_open, self.script_open + 2),
            ));
        };
        let start = self.pos;
        self.pos += len;
        self.mode = Mode::ScriptClose;
        Ok(Token::new(
            TokenKind::Script(rest[..len].to_string()),
            self.span(start, self.pos),
        ))
    }

    fn lex_script_close(&mut self) -> Token {
        let start = self.pos;
        self.pos += 2;
        self.mode = Mode::Text;
        Token::new(TokenKind::CloseScript, self.span(start, self.pos))
    }

    fn lex_code(&mut self) -> Result<Token, LexError> {
        let source = self.source;
        let rest = &source[self.pos..];
        let mut lexer = RawToken::lexer(rest);
        let Some(result) = lexer.next() else {
            self.pos = source.len();
            return Ok(self.eof());
        };

        let range = lexer.span();
        let start = self.pos + range.start;
        let end = self.pos + range.end;
        let Ok(raw) = result else {
            self.finished = true;
            return Err(self.classify_error(start));
        };

        let span = self.span(start, end);
        let kind = match convert(raw, lexer.slice(), span) {
            Ok(kind) => kind,
            Err(error) => {
                self.finished = true;
                return Err(error);
            }
        };
        self.pos = end;
        if matches!(kind, TokenKind::CloseExpr | TokenKind::CloseStmt) {
            self.leave_code();
        }
        Ok(Token::new(kind, span))
    }

    fn leave_code(&mut self) {
        if !self.code_only {
            self.mode = Mode::Text;
        }
    }

    fn classify_error(&self, start: usize) -> LexError {
        let found = self.source[start..].chars().next().unwrap_or('\0');
        let span = self.span(start, start + found.len_utf8());
        match found {
            '}' => LexError::malformed_closer(span),
            '\'' | '"' => LexError::unterminated_string(span),
            '!' => LexError::unknown_operator(span, "!"),
            other => LexError::unexpected_character(span, other),
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexError>;

    /// Yields every token up to and including `Eof`, or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.kind == TokenKind::Eof => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

/// Collect a whole template's tokens, including the final `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens: Result<Vec<_>, _> = Scanner::new(source).collect();
    if let Ok(tokens) = &tokens {
        tracing::debug!(count = tokens.len(), "tokenized template");
    }
    tokens
}

/// Offset of the first `{{`, `{%`, `{!` or `{#` in `text`.
fn find_open_delimiter(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(offset) = memchr(b'{', &bytes[from..]) {
        let at = from + offset;
        if matches!(bytes.get(at + 1), Some(b'{' | b'%' | b'!' | b'#')) {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

fn convert(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    Ok(match raw {
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
        RawToken::Int => TokenKind::Int(
            slice
                .parse::<i64>()
                .map_err(|_| LexError::int_overflow(span))?,
        ),
        RawToken::SingleQuoted | RawToken::DoubleQuoted => {
            TokenKind::Str(escape::unescape(&slice[1..slice.len() - 1]))
        }
        RawToken::CloseExpr => TokenKind::CloseExpr,
        RawToken::CloseStmt => TokenKind::CloseStmt,
        RawToken::CloseScript => TokenKind::CloseScript,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::SlashSlash => TokenKind::SlashSlash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::At => TokenKind::At,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::PipeGt => TokenKind::PipeGt,
        RawToken::Not => TokenKind::Not,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::While => TokenKind::While,
        RawToken::EndFor => TokenKind::EndFor,
        RawToken::EndWhile => TokenKind::EndWhile,
        RawToken::Join => TokenKind::Join,
        RawToken::EndJoin => TokenKind::EndJoin,
        RawToken::With => TokenKind::With,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::Elif => TokenKind::Elif,
        RawToken::EndIf => TokenKind::EndIf,
        RawToken::NoIndent => TokenKind::NoIndent,
        RawToken::EndNoIndent => TokenKind::EndNoIndent,
        RawToken::SetIndent => TokenKind::SetIndent,
        RawToken::EndSetIndent => TokenKind::EndSetIndent,
        RawToken::Dedent => TokenKind::Dedent,
        RawToken::EndDedent => TokenKind::EndDedent,
    })
}

#[cfg(test)]
mod tests;
