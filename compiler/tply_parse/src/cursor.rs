//! Lazy token cursor with constant lookahead.
//!
//! Tokens are pulled from the scanner on demand; at most two are buffered,
//! which is all the statement grammar needs (`{%` followed by a keyword).

use std::collections::VecDeque;

use tply_ir::{Span, Token, TokenKind, TokenTag};
use tply_lexer::Scanner;
use tracing::trace;

use crate::ParseError;

pub(crate) struct Cursor<'src> {
    scanner: Scanner<'src>,
    lookahead: VecDeque<Token>,
    /// Added to every span; non-zero when lexing a fragment of a larger file.
    offset: u32,
    prev_span: Span,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(scanner: Scanner<'src>, offset: u32) -> Self {
        Cursor {
            scanner,
            lookahead: VecDeque::with_capacity(2),
            offset,
            prev_span: Span::point(offset),
        }
    }

    fn shift(&self, span: Span) -> Span {
        Span::new(
            span.start.saturating_add(self.offset),
            span.end.saturating_add(self.offset),
        )
    }

    fn fill(&mut self, n: usize) -> Result<(), ParseError> {
        while self.lookahead.len() <= n {
            let mut token = self.scanner.next_token().map_err(|mut error| {
                error.span = self.shift(error.span);
                ParseError::from(error)
            })?;
            token.span = self.shift(token.span);
            self.lookahead.push_back(token);
        }
        Ok(())
    }

    /// The current token.
    pub(crate) fn peek(&mut self) -> Result<&Token, ParseError> {
        self.peek_nth(0)
    }

    /// The token `n` positions ahead of the current one.
    pub(crate) fn peek_nth(&mut self, n: usize) -> Result<&Token, ParseError> {
        self.fill(n)?;
        Ok(&self.lookahead[n])
    }

    pub(crate) fn peek_tag(&mut self) -> Result<TokenTag, ParseError> {
        Ok(self.peek()?.tag())
    }

    pub(crate) fn check(&mut self, tag: TokenTag) -> Result<bool, ParseError> {
        Ok(self.peek_tag()? == tag)
    }

    /// Consume and return the current token.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        self.fill(0)?;
        match self.lookahead.pop_front() {
            Some(token) => {
                trace!(kind = ?token.kind, "advance");
                self.prev_span = token.span;
                Ok(token)
            }
            None => Ok(Token::new(TokenKind::Eof, self.prev_span)),
        }
    }

    /// Consume the current token if it has `tag`.
    pub(crate) fn eat(&mut self, tag: TokenTag) -> Result<Option<Token>, ParseError> {
        if self.check(tag)? {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consume a token with `tag` or fail naming it as the only expectation.
    pub(crate) fn expect(&mut self, tag: TokenTag) -> Result<Token, ParseError> {
        if self.check(tag)? {
            self.advance()
        } else {
            Err(self.unexpected([tag])?)
        }
    }

    /// Build an error for the current token against an expected set.
    pub(crate) fn unexpected(
        &mut self,
        expected: impl IntoIterator<Item = TokenTag>,
    ) -> Result<ParseError, ParseError> {
        let token = self.peek()?;
        Ok(ParseError::unexpected(
            token.span,
            expected,
            token.tag(),
            token.kind.display_name(),
        ))
    }

    pub(crate) fn prev_span(&self) -> Span {
        self.prev_span
    }
}
