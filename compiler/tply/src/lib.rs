//! tply - text templates whose output is indented for the output.
//!
//! ```text
//! {% for field in fields %}
//!     {{ field |> snake }}: {{ types[index] }},
//! {% endfor %}
//! ```
//!
//! renders one line per field at the column of the `for` tag, however deeply
//! the template nests it. The pipeline is:
//!
//! - `tply_lexer`: text and embedded syntax into tokens
//! - `tply_parse`: tokens into a statement tree
//! - `tply_outline`: source indentation normalized out of the tree
//! - `tply_eval`: rendering with output-level indentation
//!
//! [`compile`] runs the first three once; a [`CompiledTemplate`] can then be
//! rendered any number of times, from any thread.

mod error;
mod options;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Once;

use tply_eval::{Env, RenderConfig};
use tply_outline::OutlinedTemplate;

pub use error::{Error, Location};
pub use options::Options;
pub use tply_eval::{AssignmentScript, EvalError, Function, NoScripts, ScriptEvaluator, Value};

/// Initial bindings of the global scope.
pub type Bindings = BTreeMap<String, Value>;

/// A parsed and outlined template.
#[derive(Debug)]
pub struct CompiledTemplate {
    outlined: OutlinedTemplate,
}

impl CompiledTemplate {
    pub fn name(&self) -> &str {
        self.outlined.source().name()
    }

    pub fn source_text(&self) -> &str {
        self.outlined.source().text()
    }

    /// Render with `bindings` as the global scope.
    pub fn render(&self, bindings: &Bindings, options: &Options) -> Result<String, Error> {
        let globals = Env::globals();
        for (name, value) in bindings {
            globals.define(name.clone(), value.clone());
        }
        let config = RenderConfig {
            indentation: &options.indentation,
            scripts: options.script_evaluator.as_ref(),
        };
        tply_eval::render(&self.outlined, &globals, &config)
            .map_err(|error| Error::eval(error, self.outlined.source()))
    }
}

/// Lex, parse and outline `source`. `name` is used in error locations.
pub fn compile(source: &str, name: &str) -> Result<CompiledTemplate, Error> {
    let template = tply_parse::parse(name, source).map_err(|error| Error::parse(error, name, source))?;
    Ok(CompiledTemplate {
        outlined: tply_outline::outline(template),
    })
}

/// Template text, or a template compiled earlier.
#[derive(Debug)]
pub enum Source<'a> {
    Text(Cow<'a, str>),
    Compiled(&'a CompiledTemplate),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Source<'_> {
    fn from(text: String) -> Self {
        Source::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a CompiledTemplate> for Source<'a> {
    fn from(template: &'a CompiledTemplate) -> Self {
        Source::Compiled(template)
    }
}

/// Render a template in one call. Text is compiled under
/// [`Options::file_name`].
pub fn evaluate<'a>(source: impl Into<Source<'a>>, bindings: &Bindings, options: &Options) -> Result<String, Error> {
    match source.into() {
        Source::Text(text) => compile(&text, &options.file_name)?.render(bindings, options),
        Source::Compiled(template) => template.render(bindings, options),
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `TPLY_LOG`, e.g.
/// `TPLY_LOG=tply_outline=debug`. Does nothing when the variable is unset,
/// and only the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if let Ok(filter) = EnvFilter::try_from_env("TPLY_LOG") {
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
