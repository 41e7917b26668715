use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tply_eval::{AssignmentScript, NoScripts, ScriptEvaluator};

/// Render settings.
///
/// `indentation` and `file_name` can be loaded from a host's own config
/// file; the script evaluator always starts as [`AssignmentScript`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// One level of `setindent`.
    pub indentation: String,
    /// Name used in error locations for templates given as text.
    pub file_name: String,
    #[serde(skip, default = "default_scripts")]
    pub script_evaluator: Arc<dyn ScriptEvaluator>,
}

fn default_scripts() -> Arc<dyn ScriptEvaluator> {
    Arc::new(AssignmentScript)
}

impl Default for Options {
    fn default() -> Self {
        Options {
            indentation: "  ".to_string(),
            file_name: "<template>".to_string(),
            script_evaluator: default_scripts(),
        }
    }
}

impl Options {
    #[must_use]
    pub fn with_indentation(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = indentation.into();
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    #[must_use]
    pub fn with_script_evaluator(mut self, evaluator: impl ScriptEvaluator + 'static) -> Self {
        self.script_evaluator = Arc::new(evaluator);
        self
    }

    /// Make every `{! ... !}` block an error.
    #[must_use]
    pub fn without_scripts(self) -> Self {
        self.with_script_evaluator(NoScripts)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("indentation", &self.indentation)
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}
