//! Outlining: the static pass between parsing and evaluation.
//!
//! Templates are indented for whoever reads the template, not for whoever
//! reads the output. Outlining rewrites the text stored in the tree so that
//! every block body is indented relative to its own block instead of the
//! file's column layout. Passes, in order:
//!
//! 1. comment removal (whole-line comments take their line with them)
//! 2. indent assignment: the source column of every statement
//! 3. classification of each block as *wrapped* or *inline*
//! 4. body redenting for wrapped blocks, innermost first
//! 5. undenting: blanks before the tags of wrapped blocks are dropped
//! 6. scaffolding removal: the newline after each wrapped tag is dropped
//!
//! # Wrapped blocks
//!
//! A block is wrapped when it owns whole lines: the text before it ends in a
//! newline (or it is first), the text after it starts with one (or it is
//! last), and each of its bodies starts and ends with a newline. Blanks
//! next to those newlines are ignored. Everything else is inline and is left
//! exactly as written.
//!
//! The result is an [`OutlinedTemplate`]. It has no interior mutability and
//! can be shared between threads and rendered any number of times.

mod columns;
mod comments;
mod layout;
mod siblings;
mod trim;
mod wrap;

use tply_ir::{BodyId, SourceFile, Template, TemplateArena};

pub use layout::Layout;

/// A template after outlining, with its layout side table.
#[derive(Clone, Debug)]
pub struct OutlinedTemplate {
    template: Template,
    layout: Layout,
}

impl OutlinedTemplate {
    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn arena(&self) -> &TemplateArena {
        &self.template.arena
    }

    pub fn root(&self) -> BodyId {
        self.template.root
    }

    pub fn source(&self) -> &SourceFile {
        &self.template.source
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

/// Run every outlining pass over `template`.
#[tracing::instrument(level = "debug", skip_all, fields(name = template.name()))]
pub fn outline(mut template: Template) -> OutlinedTemplate {
    let root = template.root;
    let arena = &mut template.arena;

    comments::remove_comments(arena, root);
    tracing::debug!("removed comments");

    let mut layout = Layout::new(arena.stmt_capacity());
    columns::assign_indent_levels(arena, root, &mut layout);
    wrap::classify(arena, root, &mut layout);
    tracing::debug!(wrapped = layout.wrapped_count(), "classified blocks");

    columns::redent_bodies(arena, root, &layout);
    trim::undent_tags(arena, root, &layout);
    trim::remove_scaffolding(arena, root, &layout);
    tracing::debug!("outlined template");

    OutlinedTemplate { template, layout }
}

#[cfg(test)]
mod tests;
