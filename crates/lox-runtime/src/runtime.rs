//! Lox runtime API for embedding
//!
//! [`Lox`] drives the whole pipeline: scan, parse, and (only when both were
//! clean) interpret. Every error is forwarded to a [`Reporter`]; the session
//! never prints diagnostics or exits on its own.

use crate::ast::Stmt;
use crate::diagnostic::{CompileError, Diagnostic, DiagnosticReport, Reporter};
use crate::interpreter::{Interpreter, InterpreterOptions, PrintSink};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::Token;
use log::debug;

/// Result type for the convenience API
pub type RuntimeResult<T> = Result<T, Vec<Diagnostic>>;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every statement executed
    Success,
    /// Lexical or syntax errors; nothing was executed
    CompileError,
    /// Execution stopped at a runtime error
    RuntimeError,
}

/// Scan `source` into tokens
pub fn scan(source: &str) -> (Vec<Token>, Vec<CompileError>) {
    Lexer::new(source).tokenize()
}

/// Scan and parse `source`, collecting errors from both phases
pub fn parse_source(source: &str) -> (Vec<Stmt>, Vec<CompileError>) {
    let (tokens, mut errors) = scan(source);
    let (statements, parse_errors) = Parser::new(tokens).parse();
    errors.extend(parse_errors);
    (statements, errors)
}

/// Lox session
///
/// Global variables persist across `run` calls on the same session.
/// Independent sessions share nothing.
///
/// # Examples
///
/// ```
/// use lox_runtime::Lox;
///
/// let mut lox = Lox::new();
/// let printed = lox.eval("print 1 + 2 * 3 - 4 / 2;").unwrap();
/// assert_eq!(printed, vec!["5"]);
/// ```
#[derive(Debug, Default)]
pub struct Lox {
    interpreter: Interpreter,
}

impl Lox {
    /// Create a new session with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with explicit interpreter options
    pub fn with_options(options: InterpreterOptions) -> Self {
        Self {
            interpreter: Interpreter::with_options(options),
        }
    }

    /// Run `source`, sending prints to `out` and errors to `reporter`
    ///
    /// All lexical and syntax errors are reported, in source order per
    /// phase. If there were any, nothing is executed.
    pub fn run(
        &mut self,
        source: &str,
        out: &mut dyn PrintSink,
        reporter: &mut dyn Reporter,
    ) -> RunStatus {
        let (statements, errors) = parse_source(source);

        if !errors.is_empty() {
            debug!("{} compile errors, skipping execution", errors.len());
            for error in &errors {
                reporter.error(error);
            }
            return RunStatus::CompileError;
        }

        match self.interpreter.interpret(&statements, out) {
            Ok(()) => RunStatus::Success,
            Err(error) => {
                reporter.runtime_error(&error);
                RunStatus::RuntimeError
            }
        }
    }

    /// Run `source`, capturing prints and diagnostics
    pub fn run_captured(&mut self, source: &str) -> (Vec<String>, DiagnosticReport) {
        let mut out: Vec<String> = Vec::new();
        let mut report = DiagnosticReport::new();
        self.run(source, &mut out, &mut report);
        (out, report)
    }

    /// Evaluate `source` and return what it printed
    ///
    /// Output printed before a runtime error is discarded along with it.
    pub fn eval(&mut self, source: &str) -> RuntimeResult<Vec<String>> {
        let (out, report) = self.run_captured(source);
        if report.is_empty() {
            Ok(out)
        } else {
            Err(report.into_diagnostics())
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Drop all global state
    pub fn reset(&mut self) {
        self.interpreter.reset();
    }
}
