//! Lox Runtime - Core language implementation
//!
//! This library provides the Lox language pipeline:
//! - Lexical analysis and recursive-descent parsing with error recovery
//! - A tree-walking interpreter over a chained scope environment
//! - Diagnostics and the reporting interface used by drivers

/// Lox runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod diagnostic;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod repl;
pub mod runtime;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use ast::{Expr, Program, Stmt, VersionedProgram, AST_VERSION};
pub use diagnostic::formatter::{ColorMode, DiagnosticFormatter};
pub use diagnostic::{
    error_codes, CompileError, Diagnostic, DiagnosticKind, DiagnosticLevel, DiagnosticReport,
    Reporter, DIAG_VERSION,
};
pub use environment::Environment;
pub use interpreter::{
    Interpreter, InterpreterOptions, PrintSink, StdoutSink, UninitializedPolicy,
};
pub use lexer::Lexer;
pub use parser::Parser;
pub use printer::AstPrinter;
pub use repl::{ReplCore, ReplResult};
pub use runtime::{parse_source, scan, Lox, RunStatus, RuntimeResult};
pub use token::{Literal, Token, TokenKind};
pub use value::{RuntimeError, Value};
