//! Parser for tply templates.
//!
//! Recursive descent over statements, precedence climbing over expressions.
//! The parser drives a lazy [`Scanner`] through a two-token [`Cursor`] and
//! writes nodes straight into a [`TemplateArena`].
//!
//! # Closing keywords
//!
//! Every open block pushes the keywords allowed to end its body. A statement
//! keyword that neither opens a block nor closes the innermost one fails with
//! an expected set naming both the openers and those closers, so `{% endif %}`
//! inside a `for` reports that `endfor` was wanted.

mod cursor;
mod error;
mod grammar;

use smallvec::SmallVec;
use tply_ir::{BodyId, SourceFile, Template, TemplateArena, TokenTag};
use tply_lexer::Scanner;

pub use error::{ErrorContext, ParseError, ParseErrorKind};
pub use grammar::script::{ScriptProgram, ScriptStmt};

use cursor::Cursor;

pub(crate) type Closers = SmallVec<[TokenTag; 3]>;

pub(crate) struct Parser<'src> {
    cursor: Cursor<'src>,
    arena: TemplateArena,
    closers: Vec<Closers>,
}

impl<'src> Parser<'src> {
    fn new(scanner: Scanner<'src>, offset: u32) -> Self {
        Parser {
            cursor: Cursor::new(scanner, offset),
            arena: TemplateArena::new(),
            closers: Vec::new(),
        }
    }
}

/// Parse a whole template.
#[tracing::instrument(level = "debug", skip_all, fields(name = name))]
pub fn parse(name: &str, source: &str) -> Result<Template, ParseError> {
    let mut parser = Parser::new(Scanner::new(source), 0);
    let root = parser.parse_template()?;
    tracing::debug!(
        statements = parser.arena.stmt_capacity(),
        "parsed template"
    );
    Ok(Template::new(parser.arena, root, SourceFile::new(name, source)))
}

/// Parse the body of a `{! ... !}` block.
///
/// `offset` is where the body starts in the enclosing template, so spans in
/// the result (and in errors) point into that template.
pub fn parse_script(source: &str, offset: u32) -> Result<ScriptProgram, ParseError> {
    grammar::script::parse_program(source, offset)
}

impl Parser<'_> {
    fn parse_template(&mut self) -> Result<BodyId, ParseError> {
        let root = self.arena.alloc_body();
        while !self.cursor.check(TokenTag::Eof)? {
            self.parse_node(root)
                .map_err(|error| error.in_context(ErrorContext::Template))?;
        }
        Ok(root)
    }
}

#[cfg(test)]
mod tests;
