//! REPL core logic (UI-agnostic)

use crate::diagnostic::{Diagnostic, DiagnosticReport};
use crate::interpreter::{InterpreterOptions, PrintSink};
use crate::runtime::{Lox, RunStatus};
use crate::value::Value;

/// REPL result type
#[derive(Debug, Clone)]
pub struct ReplResult {
    /// Lines printed while evaluating the input
    pub output: Vec<String>,
    /// Diagnostics from all phases
    pub diagnostics: Vec<Diagnostic>,
    pub status: RunStatus,
}

impl ReplResult {
    pub fn is_ok(&self) -> bool {
        self.status == RunStatus::Success
    }
}

/// REPL core state
///
/// Maintains persistent state across multiple eval calls:
/// - Global variable declarations persist
/// - Errors do not reset state, and do not carry over to the next line
#[derive(Debug, Default)]
pub struct ReplCore {
    lox: Lox,
    options: InterpreterOptions,
}

impl ReplCore {
    /// Create a new REPL core
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self {
            lox: Lox::with_options(options),
            options,
        }
    }

    /// Evaluate a line of input against the persistent session
    pub fn eval_line(&mut self, input: &str) -> ReplResult {
        let mut output: Vec<String> = Vec::new();
        let mut result = self.eval_line_to(input, &mut output);
        result.output = output;
        result
    }

    /// Evaluate a line, streaming prints to `out` as they happen
    ///
    /// The returned `output` is empty; everything printed went to `out`.
    pub fn eval_line_to(&mut self, input: &str, out: &mut dyn PrintSink) -> ReplResult {
        let mut report = DiagnosticReport::for_source("<repl>", input);
        let status = self.lox.run(input, out, &mut report);

        ReplResult {
            output: Vec::new(),
            diagnostics: report.into_diagnostics(),
            status,
        }
    }

    /// Global variables, sorted by name
    pub fn variables(&self) -> Vec<(String, Value)> {
        self.lox.interpreter().environment().globals()
    }

    /// Reset REPL state
    ///
    /// Clears all variables, keeping the configured options
    pub fn reset(&mut self) {
        self.lox = Lox::with_options(self.options);
    }
}
