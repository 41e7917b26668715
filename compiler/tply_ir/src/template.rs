use crate::{BodyId, SourceFile, TemplateArena};

/// A parsed template: its arena, the root body, and the source it came from.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Template {
    pub arena: TemplateArena,
    pub root: BodyId,
    pub source: SourceFile,
}

impl Template {
    pub fn new(arena: TemplateArena, root: BodyId, source: SourceFile) -> Self {
        Template {
            arena,
            root,
            source,
        }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }
}
