//! Expression productions.
//!
//! Binary operators use precedence climbing over [`binary_precedence`].
//! Every operator application is lowered to a call of a variable named by
//! the operator symbol, so `a + b` becomes `+(a, b)` and `not a` becomes
//! `not(a)`.

use tply_ir::{ExprId, ExprKind, Literal, Span, Token, TokenKind, TokenTag};

use crate::{ParseError, ParseErrorKind, Parser};

/// Binding power, low to high, and whether the operator is right-associative.
fn binary_precedence(tag: TokenTag) -> Option<(u8, bool)> {
    let entry = match tag {
        TokenTag::Or => (0, false),
        TokenTag::And => (1, false),
        TokenTag::In
        | TokenTag::EqEq
        | TokenTag::NotEq
        | TokenTag::Lt
        | TokenTag::LtEq
        | TokenTag::Gt
        | TokenTag::GtEq => (3, false),
        TokenTag::Pipe => (4, false),
        TokenTag::Caret => (5, false),
        TokenTag::Amp => (6, false),
        TokenTag::Shl | TokenTag::Shr => (7, false),
        TokenTag::Plus | TokenTag::Minus => (8, false),
        TokenTag::Star
        | TokenTag::Slash
        | TokenTag::At
        | TokenTag::SlashSlash
        | TokenTag::Percent => (9, false),
        TokenTag::StarStar => (11, true),
        TokenTag::PipeGt => (12, false),
        _ => return None,
    };
    Some(entry)
}

/// Binding power of prefix operators; the operand is parsed at this level.
fn prefix_precedence(tag: TokenTag) -> Option<u8> {
    match tag {
        TokenTag::Not => Some(2),
        TokenTag::Minus | TokenTag::Plus | TokenTag::Tilde => Some(10),
        _ => None,
    }
}

/// What may start an expression, for error messages.
const EXPR_START: [TokenTag; 5] = [
    TokenTag::Ident,
    TokenTag::Int,
    TokenTag::Str,
    TokenTag::LParen,
    TokenTag::Minus,
];

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary(0)
    }

    fn parse_binary(&mut self, min: u8) -> Result<ExprId, ParseError> {
        tply_stack::with_stack(|| {
            let mut lhs = self.parse_prefix()?;
            loop {
                let Some((precedence, right_assoc)) = binary_precedence(self.cursor.peek_tag()?)
                else {
                    break;
                };
                if precedence < min {
                    break;
                }
                let op = self.cursor.advance()?;
                let next_min = if right_assoc { precedence } else { precedence + 1 };
                let rhs = self.parse_binary(next_min)?;
                lhs = self.operator_call(&op, vec![lhs, rhs]);
            }
            Ok(lhs)
        })
    }

    fn parse_prefix(&mut self) -> Result<ExprId, ParseError> {
        match prefix_precedence(self.cursor.peek_tag()?) {
            Some(precedence) => {
                let op = self.cursor.advance()?;
                let operand = self.parse_binary(precedence)?;
                Ok(self.operator_call(&op, vec![operand]))
            }
            None => self.parse_postfix(),
        }
    }

    fn operator_call(&mut self, op: &Token, args: Vec<ExprId>) -> ExprId {
        let symbol = op.tag().operator_symbol().unwrap_or_default();
        let callee = self
            .arena
            .alloc_expr(ExprKind::VarRef(symbol.to_string()), op.span);
        let span = args
            .iter()
            .fold(op.span, |span, &arg| span.merge(self.arena.expr(arg).span));
        self.arena.alloc_expr(ExprKind::Call { callee, args }, span)
    }

    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.cursor.peek_tag()? {
                TokenTag::Dot => {
                    let mut names = Vec::new();
                    let mut end = self.cursor.prev_span();
                    while self.cursor.eat(TokenTag::Dot)?.is_some() {
                        let token = self.cursor.peek()?;
                        let TokenKind::Ident(name) = &token.kind else {
                            return Err(self.cursor.unexpected([TokenTag::Ident])?);
                        };
                        names.push(name.clone());
                        end = self.cursor.advance()?.span;
                    }
                    let span = self.arena.expr(expr).span.merge(end);
                    expr = self
                        .arena
                        .alloc_expr(ExprKind::Member { target: expr, names }, span);
                }
                TokenTag::LParen => {
                    self.cursor.advance()?;
                    let mut args = Vec::new();
                    while !self.cursor.check(TokenTag::RParen)? {
                        args.push(self.parse_expr()?);
                        if self.cursor.eat(TokenTag::Comma)?.is_none() {
                            break;
                        }
                    }
                    let close = self
                        .cursor
                        .expect(TokenTag::RParen)
                        .map_err(|error| widen(error, TokenTag::Comma))?;
                    let span = self.arena.expr(expr).span.merge(close.span);
                    expr = self
                        .arena
                        .alloc_expr(ExprKind::Call { callee: expr, args }, span);
                }
                TokenTag::LBracket => {
                    self.cursor.advance()?;
                    expr = self.parse_subscript(expr)?;
                }
                _ => return Ok(expr),
            }
        }
    }

    /// After `[`: `index]`, `low:high]`, `:high]`, `low:]` or `:]`.
    fn parse_subscript(&mut self, target: ExprId) -> Result<ExprId, ParseError> {
        let low = if self.cursor.check(TokenTag::Colon)? {
            None
        } else {
            Some(self.parse_expr()?)
        };

        let kind = if self.cursor.eat(TokenTag::Colon)?.is_some() {
            let high = if self.cursor.check(TokenTag::RBracket)? {
                None
            } else {
                Some(self.parse_expr()?)
            };
            ExprKind::Slice { target, low, high }
        } else {
            match low {
                Some(index) => ExprKind::Index { target, index },
                None => return Err(self.cursor.unexpected([TokenTag::Colon])?),
            }
        };

        let close = self.cursor.expect(TokenTag::RBracket)?;
        let span = self.arena.expr(target).span.merge(close.span);
        Ok(self.arena.alloc_expr(kind, span))
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let tag = self.cursor.peek_tag()?;
        match tag {
            TokenTag::Ident | TokenTag::Int | TokenTag::Str => {
                let token = self.cursor.advance()?;
                let kind = match token.kind {
                    TokenKind::Ident(name) => ExprKind::VarRef(name),
                    TokenKind::Int(value) => ExprKind::Const(Literal::Int(value)),
                    TokenKind::Str(value) => ExprKind::Const(Literal::Str(value)),
                    _ => return Err(self.cursor.unexpected(EXPR_START)?),
                };
                Ok(self.arena.alloc_expr(kind, token.span))
            }
            TokenTag::LParen => self.parse_parenthesized(),
            _ => Err(self.cursor.unexpected(EXPR_START)?),
        }
    }

    /// `()`, `(expr)`, `(expr,)` or `(a, b, ...)`.
    fn parse_parenthesized(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.expect(TokenTag::LParen)?;
        if let Some(close) = self.cursor.eat(TokenTag::RParen)? {
            return Ok(self
                .arena
                .alloc_expr(ExprKind::Tuple(Vec::new()), open.span.merge(close.span)));
        }

        let first = self.parse_expr()?;
        if self.cursor.eat(TokenTag::Comma)?.is_none() {
            self.cursor
                .expect(TokenTag::RParen)
                .map_err(|error| widen(error, TokenTag::Comma))?;
            return Ok(first);
        }

        let mut elements = vec![first];
        while !self.cursor.check(TokenTag::RParen)? {
            elements.push(self.parse_expr()?);
            if self.cursor.eat(TokenTag::Comma)?.is_none() {
                break;
            }
        }
        let close = self.cursor.expect(TokenTag::RParen)?;
        Ok(self
            .arena
            .alloc_expr(ExprKind::Tuple(elements), open.span.merge(close.span)))
    }
}

/// Widen a single-token expectation with an alternative that would also
/// have been accepted.
fn widen(error: ParseError, alternative: TokenTag) -> ParseError {
    match error.kind {
        ParseErrorKind::UnexpectedToken {
            expected,
            found,
            found_text,
        } => {
            let mut widened = vec![alternative];
            widened.extend(expected);
            let mut rebuilt = ParseError::unexpected(error.span, widened, found, found_text);
            rebuilt.context = error.context;
            rebuilt
        }
        kind => ParseError { kind, ..error },
    }
}

/// Span covering a run of expressions, for tuple-shaped statements.
pub(crate) fn span_of(parser: &Parser<'_>, exprs: &[ExprId]) -> Span {
    exprs
        .iter()
        .map(|&id| parser.arena.expr(id).span)
        .reduce(Span::merge)
        .unwrap_or(Span::DUMMY)
}
