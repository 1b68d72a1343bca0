//! The plot program interpreter.
//!
//! Ties together the scanner, parser and evaluator. Parsing and execution
//! interleave: each statement runs as soon as its `;` has been read, so a
//! program that fails halfway keeps the effects of the statements before
//! the failure.
//!
//! Besides the returned error, the interpreter keeps a diagnostics list in
//! [`Interpreter::errors`]: one info entry per drawn batch, followed by the
//! error that ended the run, if any.

mod statement;

use funcplot_graphics::bbox::BoundingBox;
use funcplot_graphics::picture::{Picture, Renderer};
use tracing::{debug, warn};

use crate::context::DrawingContext;
use crate::error::{InterpResult, InterpreterError, Severity};
use crate::parser::Parser;

// ---------------------------------------------------------------------------
// Interpreter state
// ---------------------------------------------------------------------------

/// The plot interpreter.
pub struct Interpreter {
    /// Origin, scale, rotation, style, cached points and axis range.
    pub context: DrawingContext,
    /// Every batch drawn since the last reset.
    pub picture: Picture,
    /// Diagnostics list.
    pub errors: Vec<InterpreterError>,
    /// Largest sample count a single loop may produce.
    sample_limit: Option<usize>,
}

/// Result of [`Interpreter::load_program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// One formatted line per diagnostic.
    pub diagnostics: Vec<String>,
    /// Whether the whole program ran without error.
    pub success: bool,
}

impl Interpreter {
    /// Create a new interpreter with a default context and no sample limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            context: DrawingContext::new(),
            picture: Picture::new(),
            errors: Vec::new(),
            sample_limit: None,
        }
    }

    /// Reject loops that would produce more than `limit` samples.
    pub const fn set_sample_limit(&mut self, limit: Option<usize>) {
        self.sample_limit = limit;
    }

    /// Restore the default context and clear the picture and diagnostics.
    pub fn reset_context(&mut self) {
        self.context.reset();
        self.picture.clear();
        self.errors.clear();
    }

    /// Run a program on top of the current state.
    ///
    /// Stops at the first error, which is both returned and appended to
    /// [`Self::errors`].
    pub fn run(&mut self, source: &str) -> InterpResult<()> {
        let mut parser = Parser::new(source);
        let result = self.run_statements(&mut parser);
        if let Err(err) = &result {
            warn!(kind = ?err.kind, "{err}");
            self.errors.push(err.clone());
        }
        result
    }

    fn run_statements(&mut self, parser: &mut Parser) -> InterpResult<()> {
        while let Some(stmt) = parser.next_statement()? {
            let span = parser.statement_span();
            debug!(statement = stmt.keyword(), start = span.start, "execute");
            self.execute(&stmt).map_err(|err| {
                if err.span.is_some() {
                    err
                } else {
                    err.with_span(span)
                }
            })?;
        }
        Ok(())
    }

    /// Reset, run `source`, and report the diagnostics.
    pub fn load_program(&mut self, source: &str) -> LoadReport {
        self.reset_context();
        let success = self.run(source).is_ok();
        LoadReport {
            diagnostics: self.errors.iter().map(format_diagnostic).collect(),
            success,
        }
    }

    /// Hand every recorded batch, in order, to `renderer`.
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        self.picture.replay(renderer);
    }

    /// Bounds of everything plotted since the last reset.
    #[must_use]
    pub const fn axis_range(&self) -> &BoundingBox {
        &self.context.range
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// `info: drew 3 points`, `error: syntax error: [4..5] expected ...`
fn format_diagnostic(err: &InterpreterError) -> String {
    match err.severity {
        Severity::Info => format!("{}: {err}", err.severity.label()),
        Severity::Error => {
            format!("{}: {}: {err}", err.severity.label(), err.kind.class())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
