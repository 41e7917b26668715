//! Statement productions.

use tply_ir::{BodyId, ExprKind, IfCase, Literal, Span, StmtKind, TokenKind, TokenTag};

use crate::{Closers, ErrorContext, ParseError, Parser};

/// Keywords that may follow `{%` to open a statement.
const OPENERS: [TokenTag; 5] = [
    TokenTag::For,
    TokenTag::Join,
    TokenTag::If,
    TokenTag::SetIndent,
    TokenTag::NoIndent,
];

impl Parser<'_> {
    /// Parse one node of a body and append it to `body`.
    pub(crate) fn parse_node(&mut self, body: BodyId) -> Result<(), ParseError> {
        tply_stack::with_stack(|| self.parse_node_inner(body))
    }

    fn parse_node_inner(&mut self, body: BodyId) -> Result<(), ParseError> {
        let token = self.cursor.advance()?;
        match token.kind {
            TokenKind::Text(text) => {
                self.arena.push_stmt(body, StmtKind::Text(text), token.span);
            }
            TokenKind::Comment(text) => {
                self.arena.push_stmt(body, StmtKind::Comment(text), token.span);
            }
            TokenKind::OpenExpr => {
                let expr = self
                    .parse_expr()
                    .map_err(|error| error.in_context(ErrorContext::Expression))?;
                let close = self.cursor.expect(TokenTag::CloseExpr)?;
                self.arena
                    .push_stmt(body, StmtKind::Expression(expr), token.span.merge(close.span));
            }
            TokenKind::OpenScript => {
                let script = self.cursor.advance()?;
                let TokenKind::Script(content) = script.kind else {
                    return Err(ParseError::unexpected(
                        script.span,
                        [TokenTag::Script],
                        script.kind.tag(),
                        script.kind.display_name(),
                    ));
                };
                let close = self.cursor.expect(TokenTag::CloseScript)?;
                self.arena
                    .push_stmt(body, StmtKind::Script(content), token.span.merge(close.span));
            }
            TokenKind::OpenStmt => self.parse_statement(body, token.span)?,
            other => {
                return Err(ParseError::unexpected(
                    token.span,
                    [
                        TokenTag::Text,
                        TokenTag::OpenExpr,
                        TokenTag::OpenStmt,
                        TokenTag::OpenScript,
                    ],
                    other.tag(),
                    other.display_name(),
                ));
            }
        }
        Ok(())
    }

    /// Parse nodes into `body` until `{%` followed by one of `closers`.
    /// The closing `{%` is left unconsumed.
    fn parse_body(&mut self, body: BodyId, closers: &[TokenTag]) -> Result<(), ParseError> {
        self.closers.push(Closers::from_slice(closers));
        let result = self.parse_body_inner(body, closers);
        self.closers.pop();
        result
    }

    fn parse_body_inner(&mut self, body: BodyId, closers: &[TokenTag]) -> Result<(), ParseError> {
        loop {
            match self.cursor.peek_tag()? {
                TokenTag::Eof => return Err(self.cursor.unexpected(closers.iter().copied())?),
                TokenTag::OpenStmt if closers.contains(&self.cursor.peek_nth(1)?.tag()) => {
                    return Ok(());
                }
                _ => self.parse_node(body)?,
            }
        }
    }

    /// After `{%`: dispatch on the statement keyword.
    fn parse_statement(&mut self, body: BodyId, open: Span) -> Result<(), ParseError> {
        match self.cursor.peek_tag()? {
            TokenTag::If => self
                .parse_if(body, open)
                .map_err(|error| error.in_context(ErrorContext::IfStatement)),
            TokenTag::For => self
                .parse_for(body, open)
                .map_err(|error| error.in_context(ErrorContext::ForStatement)),
            TokenTag::Join => self
                .parse_join(body, open)
                .map_err(|error| error.in_context(ErrorContext::JoinStatement)),
            TokenTag::SetIndent | TokenTag::NoIndent => self
                .parse_set_indent(body, open)
                .map_err(|error| error.in_context(ErrorContext::SetIndentStatement)),
            _ => {
                let innermost: Closers = self.closers.last().cloned().unwrap_or_default();
                Err(self
                    .cursor
                    .unexpected(OPENERS.into_iter().chain(innermost))?)
            }
        }
    }

    /// Consume `{% keyword %}` and return the span of the whole tag.
    fn parse_closing_tag(&mut self, keyword: TokenTag) -> Result<Span, ParseError> {
        let open = self.cursor.expect(TokenTag::OpenStmt)?;
        self.cursor.expect(keyword)?;
        let close = self.cursor.expect(TokenTag::CloseStmt)?;
        Ok(open.span.merge(close.span))
    }

    fn parse_if(&mut self, body: BodyId, open: Span) -> Result<(), ParseError> {
        const CASE_CLOSERS: [TokenTag; 3] = [TokenTag::Elif, TokenTag::Else, TokenTag::EndIf];

        self.cursor.expect(TokenTag::If)?;
        let test = self.parse_expr()?;
        let close = self.cursor.expect(TokenTag::CloseStmt)?;
        let mut cases = Vec::new();
        let mut case_span = open.merge(close.span);

        let first = self.arena.alloc_body();
        self.parse_body(first, &CASE_CLOSERS)?;
        cases.push(IfCase {
            test: Some(test),
            body: first,
            span: case_span,
        });

        let end = loop {
            let tag_open = self.cursor.expect(TokenTag::OpenStmt)?;
            let keyword = self.cursor.advance()?;
            match keyword.kind {
                TokenKind::Elif => {
                    let test = self.parse_expr()?;
                    let close = self.cursor.expect(TokenTag::CloseStmt)?;
                    case_span = tag_open.span.merge(close.span);
                    let case_body = self.arena.alloc_body();
                    self.parse_body(case_body, &CASE_CLOSERS)?;
                    cases.push(IfCase {
                        test: Some(test),
                        body: case_body,
                        span: case_span,
                    });
                }
                TokenKind::Else => {
                    let close = self.cursor.expect(TokenTag::CloseStmt)?;
                    case_span = tag_open.span.merge(close.span);
                    let case_body = self.arena.alloc_body();
                    self.parse_body(case_body, &[TokenTag::EndIf])?;
                    cases.push(IfCase {
                        test: None,
                        body: case_body,
                        span: case_span,
                    });
                    break self.parse_closing_tag(TokenTag::EndIf)?;
                }
                TokenKind::EndIf => {
                    let close = self.cursor.expect(TokenTag::CloseStmt)?;
                    break tag_open.span.merge(close.span);
                }
                other => {
                    return Err(ParseError::unexpected(
                        keyword.span,
                        CASE_CLOSERS,
                        other.tag(),
                        other.display_name(),
                    ));
                }
            }
        };

        self.arena
            .push_stmt(body, StmtKind::If(cases), open.merge(end));
        Ok(())
    }

    fn parse_for(&mut self, body: BodyId, open: Span) -> Result<(), ParseError> {
        self.cursor.expect(TokenTag::For)?;
        let pattern = self.parse_pattern()?;
        self.cursor.expect(TokenTag::In)?;
        let iterable = self.parse_expr()?;
        self.cursor.expect(TokenTag::CloseStmt)?;

        let inner = self.arena.alloc_body();
        self.parse_body(inner, &[TokenTag::EndFor])?;
        let end = self.parse_closing_tag(TokenTag::EndFor)?;

        self.arena.push_stmt(
            body,
            StmtKind::For {
                pattern,
                iterable,
                body: inner,
            },
            open.merge(end),
        );
        Ok(())
    }

    fn parse_join(&mut self, body: BodyId, open: Span) -> Result<(), ParseError> {
        self.cursor.expect(TokenTag::Join)?;
        let pattern = self.parse_pattern()?;
        self.cursor.expect(TokenTag::In)?;
        let iterable = self.parse_expr()?;
        self.cursor.expect(TokenTag::With)?;
        let separator = self.parse_expr()?;
        self.cursor.expect(TokenTag::CloseStmt)?;

        let inner = self.arena.alloc_body();
        self.parse_body(inner, &[TokenTag::EndJoin])?;
        let end = self.parse_closing_tag(TokenTag::EndJoin)?;

        self.arena.push_stmt(
            body,
            StmtKind::Join {
                pattern,
                iterable,
                separator,
                body: inner,
            },
            open.merge(end),
        );
        Ok(())
    }

    /// `setindent level` or `noindent`, which is `setindent 0`.
    fn parse_set_indent(&mut self, body: BodyId, open: Span) -> Result<(), ParseError> {
        let keyword = self.cursor.advance()?;
        let (level, closer) = if keyword.kind == TokenKind::NoIndent {
            let zero = self
                .arena
                .alloc_expr(ExprKind::Const(Literal::Int(0)), keyword.span);
            (zero, TokenTag::EndNoIndent)
        } else {
            (self.parse_expr()?, TokenTag::EndSetIndent)
        };
        self.cursor.expect(TokenTag::CloseStmt)?;

        let inner = self.arena.alloc_body();
        self.parse_body(inner, &[closer])?;
        let end = self.parse_closing_tag(closer)?;

        self.arena.push_stmt(
            body,
            StmtKind::SetIndent { level, body: inner },
            open.merge(end),
        );
        Ok(())
    }
}
