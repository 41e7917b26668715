//! Statement evaluation.
//!
//! The outliner has already fixed the indentation of every literal text, so
//! most statements simply append to the output. What remains dynamic:
//!
//! - multi-line expression values, which are re-indented to the line they
//!   land on;
//! - inline loops, whose iterations can start fresh lines;
//! - `join` separators, which are placed only once later iterations are
//!   known;
//! - `setindent`, which marks lines and is resolved after rendering.
//!
//! A [`Tracker`] follows every character emitted so these decisions can see
//! where the cursor is.

use tply_ir::{is_blank, BodyId, ExprId, PatternId, StmtId, StmtKind};
use tply_outline::OutlinedTemplate;

use crate::environment::Env;
use crate::errors::{invalid_indent_level, EvalError};
use crate::expr::{bind_pattern, eval_expr};
use crate::lines::LineBuffer;
use crate::script::ScriptEvaluator;
use crate::Value;

/// What rendering needs besides the template and bindings.
#[derive(Copy, Clone)]
pub struct RenderConfig<'a> {
    /// One level of `setindent` indentation.
    pub indentation: &'a str,
    pub scripts: &'a dyn ScriptEvaluator,
}

/// Render `template` with `globals` as the global scope. Top-level script
/// assignments end up in `globals`.
#[tracing::instrument(level = "debug", skip_all, fields(name = template.template().name()))]
pub fn render(template: &OutlinedTemplate, globals: &Env, config: &RenderConfig<'_>) -> Result<String, EvalError> {
    let mut interpreter = Interpreter {
        template,
        scripts: config.scripts,
        tracker: Tracker::default(),
    };
    let mut out = LineBuffer::new();
    interpreter.eval_body(template.root(), globals, &mut out)?;
    let text = out.resolve(config.indentation);
    tracing::debug!(bytes = text.len(), "rendered template");
    Ok(text)
}

/// Where the last emitted character left the cursor.
#[derive(Debug)]
struct Tracker {
    /// Leading blanks of the current line.
    indent: String,
    /// Nothing but blanks on the current line yet.
    at_line_start: bool,
    prev_line_blank: bool,
    ends_with_newline: bool,
}

impl Default for Tracker {
    fn default() -> Self {
        Tracker {
            indent: String::new(),
            at_line_start: true,
            prev_line_blank: false,
            ends_with_newline: false,
        }
    }
}

impl Tracker {
    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.prev_line_blank = self.at_line_start;
                self.at_line_start = true;
                self.indent.clear();
            } else if self.at_line_start && is_blank(ch) {
                self.indent.push(ch);
            } else {
                self.at_line_start = false;
            }
            self.ends_with_newline = ch == '\n';
        }
    }

    /// The cursor is on an empty line directly below another empty line.
    fn in_blank_run(&self) -> bool {
        self.at_line_start && self.prev_line_blank
    }
}

struct Interpreter<'a> {
    template: &'a OutlinedTemplate,
    scripts: &'a dyn ScriptEvaluator,
    tracker: Tracker,
}

/// Whether the next text sibling should lose one leading newline.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Collapse {
    No,
    NextNewline,
}

impl Interpreter<'_> {
    fn emit(&mut self, out: &mut LineBuffer, text: &str) {
        self.tracker.advance(text);
        out.push_str(text);
    }

    fn eval_body(&mut self, body: BodyId, env: &Env, out: &mut LineBuffer) -> Result<(), EvalError> {
        let template = self.template;
        let mut collapse = Collapse::No;
        for &stmt in template.arena().body(body) {
            collapse = tply_stack::with_stack(|| self.eval_stmt(stmt, env, out, collapse))?;
        }
        Ok(())
    }

    fn eval_stmt(
        &mut self,
        id: StmtId,
        env: &Env,
        out: &mut LineBuffer,
        collapse: Collapse,
    ) -> Result<Collapse, EvalError> {
        let template = self.template;
        let stmt = template.arena().stmt(id);
        tracing::trace!(?id, span = %stmt.span, "eval statement");
        match &stmt.kind {
            StmtKind::Text(text) => {
                let text = if collapse == Collapse::NextNewline {
                    without_leading_newline(text)
                } else {
                    text
                };
                self.emit(out, text);
            }
            // Removed by outlining.
            StmtKind::Comment(_) => {}
            StmtKind::Expression(expr) => {
                let value = eval_expr(template.arena(), *expr, env)?;
                let text = self.align(&value.to_string());
                self.emit(out, &text);
            }
            StmtKind::If(cases) => {
                for case in cases {
                    let matched = match case.test {
                        Some(test) => eval_expr(template.arena(), test, env)?.is_truthy(),
                        None => true,
                    };
                    if matched {
                        self.eval_body(case.body, env, out)?;
                        break;
                    }
                }
            }
            StmtKind::For { pattern, iterable, body } => {
                let items = self.iterate(*iterable, env)?;
                let call_site = self.tracker.indent.clone();
                let wrapped = template.layout().is_wrapped(id);
                for (index, item) in items.iter().enumerate() {
                    let scope = self.loop_scope(*pattern, index, item.clone(), env)?;
                    if index > 0 && !wrapped {
                        self.continue_line(out, &call_site);
                    }
                    self.eval_body(*body, &scope, out)?;
                }
                return Ok(self.collapse_after(wrapped, items.is_empty()));
            }
            StmtKind::Join {
                pattern,
                iterable,
                separator,
                body,
            } => {
                let items = self.iterate(*iterable, env)?;
                let separator = eval_expr(template.arena(), *separator, env)?.to_string();
                let call_site = self.tracker.indent.clone();
                let wrapped = template.layout().is_wrapped(id);
                let mut rendered = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let scope = self.loop_scope(*pattern, index, item.clone(), env)?;
                    let mut iteration = LineBuffer::new();
                    if index > 0 && !wrapped {
                        self.continue_line(&mut iteration, &call_site);
                    }
                    self.eval_body(*body, &scope, &mut iteration)?;
                    rendered.push(iteration);
                }
                join_iterations(&mut rendered, &separator);
                for iteration in rendered {
                    out.append(iteration);
                }
                return Ok(self.collapse_after(wrapped, items.is_empty()));
            }
            StmtKind::SetIndent { level, body } => {
                let level = match eval_expr(template.arena(), *level, env)? {
                    Value::Int(n) => usize::try_from(n).map_err(|_| invalid_indent_level(n.to_string())),
                    other => Err(invalid_indent_level(other.repr())),
                }
                .map_err(|error| error.with_span(template.arena().expr(*level).span))?;
                let mut inner = LineBuffer::new();
                self.eval_body(*body, env, &mut inner)?;
                inner.dedent(None);
                inner.set_indent_override(level);
                out.append(inner);
            }
            StmtKind::Script(source) => {
                let offset = stmt.span.start.saturating_add(2);
                let scope = env.child();
                self.scripts
                    .execute(source, offset, &scope)
                    .map_err(|error| error.with_span(stmt.span))?;
                for (name, value) in scope.own_bindings() {
                    env.define(name, value);
                }
            }
        }
        Ok(Collapse::No)
    }

    fn iterate(&self, iterable: ExprId, env: &Env) -> Result<Vec<Value>, EvalError> {
        let arena = self.template.arena();
        eval_expr(arena, iterable, env)?
            .iterate()
            .map_err(|error| error.with_span(arena.expr(iterable).span))
    }

    fn loop_scope(&self, pattern: PatternId, index: usize, item: Value, env: &Env) -> Result<Env, EvalError> {
        let scope = env.child();
        scope.define("index", Value::Int(i64::try_from(index).unwrap_or(i64::MAX)));
        bind_pattern(self.template.arena(), pattern, item, &scope)?;
        Ok(scope)
    }

    /// An inline iteration that starts on a fresh line lines up with the
    /// line the loop was written on.
    fn continue_line(&mut self, out: &mut LineBuffer, call_site: &str) {
        if self.tracker.ends_with_newline && !call_site.is_empty() {
            self.emit(out, call_site);
        }
    }

    fn collapse_after(&self, wrapped: bool, empty: bool) -> Collapse {
        if wrapped && empty && self.tracker.in_blank_run() {
            Collapse::NextNewline
        } else {
            Collapse::No
        }
    }

    /// Dedent a multi-line value and indent its continuation lines to the
    /// current line's indentation.
    fn align(&self, text: &str) -> String {
        if !text.contains('\n') {
            return text.to_string();
        }
        let mut buffer = LineBuffer::from_text(text);
        buffer.dedent(None);
        if !self.tracker.indent.is_empty() {
            let start = buffer.line_offset(1);
            buffer.indent(&self.tracker.indent, start);
        }
        buffer.to_string()
    }
}

fn without_leading_newline(text: &str) -> &str {
    text.trim_start_matches(is_blank).strip_prefix('\n').unwrap_or(text)
}

/// Put `separator` after the last visible character of each iteration that
/// has content and is followed by another one with content.
fn join_iterations(rendered: &mut [LineBuffer], separator: &str) {
    let mut previous: Option<usize> = None;
    for index in 0..rendered.len() {
        if !rendered[index].has_content() {
            continue;
        }
        if let Some(prev) = previous {
            let target = &mut rendered[prev];
            let at = target.rfind(|ch| !ch.is_whitespace()).map_or(0, |pos| pos + 1);
            target.insert_at(at, LineBuffer::from_text(separator));
        }
        previous = Some(index);
    }
}
