//! Loop patterns: `x`, `k, v`, `(i, (a, b))`.

use tply_ir::{PatternId, PatternKind, TokenKind, TokenTag};

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_pattern(&mut self) -> Result<PatternId, ParseError> {
        self.parse_pattern_list()
            .map_err(|error| error.in_context(ErrorContext::Pattern))
    }

    fn parse_pattern_list(&mut self) -> Result<PatternId, ParseError> {
        let first = self.parse_pattern_atom()?;
        if !self.cursor.check(TokenTag::Comma)? {
            return Ok(first);
        }
        let mut span = self.arena.pattern(first).span;
        let mut elements = vec![first];
        while self.cursor.eat(TokenTag::Comma)?.is_some() {
            let element = self.parse_pattern_atom()?;
            span = span.merge(self.arena.pattern(element).span);
            elements.push(element);
        }
        Ok(self.arena.alloc_pattern(PatternKind::Tuple(elements), span))
    }

    fn parse_pattern_atom(&mut self) -> Result<PatternId, ParseError> {
        tply_stack::with_stack(|| match self.cursor.peek_tag()? {
            TokenTag::Ident => {
                let token = self.cursor.advance()?;
                let TokenKind::Ident(name) = token.kind else {
                    return Err(self.cursor.unexpected([TokenTag::Ident])?);
                };
                Ok(self.arena.alloc_pattern(PatternKind::Var(name), token.span))
            }
            TokenTag::LParen => {
                self.cursor.advance()?;
                let inner = self.parse_pattern_list()?;
                self.cursor.expect(TokenTag::RParen)?;
                Ok(inner)
            }
            _ => Err(self
                .cursor
                .unexpected([TokenTag::Ident, TokenTag::LParen])?),
        })
    }
}
