use tply_ir::StmtId;

/// Per-statement facts computed once by outlining. Indexed by [`StmtId`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Layout {
    indent_levels: Vec<u32>,
    wrapped: Vec<bool>,
}

impl Layout {
    pub(crate) fn new(capacity: usize) -> Self {
        Layout {
            indent_levels: vec![0; capacity],
            wrapped: vec![false; capacity],
        }
    }

    /// Source column the statement starts at, counting only leading blanks
    /// of its line.
    pub fn indent_level(&self, stmt: StmtId) -> u32 {
        self.indent_levels.get(stmt.index()).copied().unwrap_or(0)
    }

    pub fn is_wrapped(&self, stmt: StmtId) -> bool {
        self.wrapped.get(stmt.index()).copied().unwrap_or(false)
    }

    pub(crate) fn set_indent_level(&mut self, stmt: StmtId, level: u32) {
        self.indent_levels[stmt.index()] = level;
    }

    pub(crate) fn set_wrapped(&mut self, stmt: StmtId, wrapped: bool) {
        self.wrapped[stmt.index()] = wrapped;
    }

    pub(crate) fn wrapped_count(&self) -> usize {
        self.wrapped.iter().filter(|&&w| w).count()
    }
}
