//! Script bodies for the built-in script evaluator.
//!
//! A script is a sequence of statements separated by newlines or `;`. Each
//! statement is `target = value` or a bare expression. Targets are names or
//! tuples of names, and a bare comma list on either side forms a tuple:
//!
//! ```text
//! {!
//!   # comments run to the end of the line
//!   total = len(items)
//!   first, rest = items[0], items[1:]
//! !}
//! ```
//!
//! Statements cannot span lines; each line is scanned on its own.

use tply_ir::{ExprId, ExprKind, PatternId, PatternKind, Span, TemplateArena, TokenTag};
use tply_lexer::Scanner;

use super::expr::span_of;
use crate::{ErrorContext, ParseError, Parser};

/// One script statement. `target` is `None` for a bare expression.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ScriptStmt {
    pub target: Option<PatternId>,
    pub value: ExprId,
    pub span: Span,
}

/// A parsed script body, sharing the template node types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ScriptProgram {
    pub arena: TemplateArena,
    pub statements: Vec<ScriptStmt>,
}

pub(crate) fn parse_program(source: &str, offset: u32) -> Result<ScriptProgram, ParseError> {
    let mut program = ScriptProgram::default();
    let mut line_start = 0usize;

    for line in source.split_inclusive('\n') {
        let start = line_start;
        line_start += line.len();
        let code = strip_comment(line);
        if code.trim().is_empty() {
            continue;
        }

        let line_offset = offset.saturating_add(u32::try_from(start).unwrap_or(u32::MAX));
        let mut parser = Parser::new(Scanner::code(code), line_offset);
        parser.arena = std::mem::take(&mut program.arena);
        let parsed = parser.parse_line();
        program.arena = std::mem::take(&mut parser.arena);
        program
            .statements
            .extend(parsed.map_err(|error| error.in_context(ErrorContext::Script))?);
    }

    tracing::debug!(statements = program.statements.len(), "parsed script");
    Ok(program)
}

/// Drop a `#` comment that starts the line (after blanks).
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        ""
    } else {
        line
    }
}

impl Parser<'_> {
    fn parse_line(&mut self) -> Result<Vec<ScriptStmt>, ParseError> {
        let mut statements = Vec::new();
        loop {
            if self.cursor.eat(TokenTag::Semicolon)?.is_some() {
                continue;
            }
            if self.cursor.check(TokenTag::Eof)? {
                return Ok(statements);
            }
            statements.push(self.parse_script_stmt()?);
            if self.cursor.eat(TokenTag::Semicolon)?.is_none() && !self.cursor.check(TokenTag::Eof)? {
                return Err(self.cursor.unexpected([
                    TokenTag::Semicolon,
                    TokenTag::Assign,
                    TokenTag::Eof,
                ])?);
            }
        }
    }

    fn parse_script_stmt(&mut self) -> Result<ScriptStmt, ParseError> {
        let lhs = self.parse_expr_list()?;
        if self.cursor.eat(TokenTag::Assign)?.is_none() {
            let span = self.arena.expr(lhs).span;
            return Ok(ScriptStmt {
                target: None,
                value: lhs,
                span,
            });
        }
        let target = self.expr_to_pattern(lhs)?;
        let value = self.parse_expr_list()?;
        let span = self
            .arena
            .pattern(target)
            .span
            .merge(self.arena.expr(value).span);
        Ok(ScriptStmt {
            target: Some(target),
            value,
            span,
        })
    }

    /// `a` or `a, b, c` (the latter as a tuple).
    fn parse_expr_list(&mut self) -> Result<ExprId, ParseError> {
        let first = self.parse_expr()?;
        if !self.cursor.check(TokenTag::Comma)? {
            return Ok(first);
        }
        let mut elements = vec![first];
        while self.cursor.eat(TokenTag::Comma)?.is_some() {
            if matches!(
                self.cursor.peek_tag()?,
                TokenTag::Assign | TokenTag::Semicolon | TokenTag::Eof
            ) {
                break;
            }
            elements.push(self.parse_expr()?);
        }
        let span = span_of(self, &elements);
        Ok(self.arena.alloc_expr(ExprKind::Tuple(elements), span))
    }

    fn expr_to_pattern(&mut self, expr: ExprId) -> Result<PatternId, ParseError> {
        let node = self.arena.expr(expr).clone();
        let kind = match node.kind {
            ExprKind::VarRef(name) => PatternKind::Var(name),
            ExprKind::Tuple(elements) => {
                let mut patterns = Vec::with_capacity(elements.len());
                for element in elements {
                    patterns.push(self.expr_to_pattern(element)?);
                }
                PatternKind::Tuple(patterns)
            }
            _ => return Err(ParseError::invalid_assign_target(node.span)),
        };
        Ok(self.arena.alloc_pattern(kind, node.span))
    }
}
