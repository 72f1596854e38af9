//! AST interpreter (tree-walking)
//!
//! Direct AST evaluation against a chained scope environment.
//! Supports:
//! - Expression evaluation (literals, unary/binary/logical ops, variables, assignment)
//! - Statement execution (declarations, print, blocks, if/else, while)
//! - Block scoping with shadowing
//!
//! Execution stops at the first runtime error, which is returned to the
//! caller; the interpreter itself never reports or terminates anything.

mod expr;
mod stmt;

use crate::ast::Stmt;
use crate::environment::Environment;
use crate::value::RuntimeError;
use log::debug;
use std::io::Write;

/// What `var name;` (no initializer) does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UninitializedPolicy {
    /// Bind nothing; reading or assigning the name later is an undefined-variable error
    #[default]
    Unbound,
    /// Bind `nil`
    Nil,
}

impl UninitializedPolicy {
    /// Parse `unbound` / `nil`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unbound" => Some(UninitializedPolicy::Unbound),
            "nil" => Some(UninitializedPolicy::Nil),
            _ => None,
        }
    }
}

/// Interpreter options
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpreterOptions {
    pub uninitialized: UninitializedPolicy,
}

/// Destination for `print` output, one call per executed `print`
pub trait PrintSink {
    fn print(&mut self, text: &str);
}

/// Collects emissions in order; used by tests and embedders
impl PrintSink for Vec<String> {
    fn print(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Writes each emission as a line on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl PrintSink for StdoutSink {
    fn print(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout (e.g. `lox script | head`) is not a script error
        let _ = writeln!(stdout, "{}", text);
    }
}

/// Interpreter state
#[derive(Debug, Default)]
pub struct Interpreter {
    /// Scope chain; global frame persists across `interpret` calls
    pub(super) environment: Environment,
    pub(super) options: InterpreterOptions,
}

impl Interpreter {
    /// Create a new interpreter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter with explicit options
    pub fn with_options(options: InterpreterOptions) -> Self {
        Self {
            environment: Environment::new(),
            options,
        }
    }

    /// Execute statements in order, stopping at the first runtime error
    ///
    /// Globals defined here remain visible to later calls.
    pub fn interpret(
        &mut self,
        statements: &[Stmt],
        out: &mut dyn PrintSink,
    ) -> Result<(), RuntimeError> {
        debug!("interpreting {} statements", statements.len());
        let result = statements
            .iter()
            .try_for_each(|stmt| self.execute(stmt, out));
        if let Err(err) = &result {
            debug!("runtime error on line {}: {}", err.line(), err);
        }
        result
    }

    /// Scope chain, for inspection
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn options(&self) -> InterpreterOptions {
        self.options
    }

    /// Drop all global state, keeping the options
    pub fn reset(&mut self) {
        self.environment = Environment::new();
    }
}
