//! Shared test utilities
//!
//! Helpers that run a program through the full pipeline and check what it
//! printed or which diagnostics it produced.

#![allow(dead_code)]

use lox_runtime::{Diagnostic, DiagnosticReport, Lox, RunStatus};

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// Run `source` in a fresh session
pub fn run(source: &str) -> (Vec<String>, DiagnosticReport, RunStatus) {
    let mut lox = Lox::new();
    let mut out: Vec<String> = Vec::new();
    let mut report = DiagnosticReport::new();
    let status = lox.run(source, &mut out, &mut report);
    (out, report, status)
}

/// Assert that `source` runs cleanly and prints exactly `expected`
///
/// # Example
/// ```
/// assert_prints("print 1 + 1;", &["2"]);
/// ```
pub fn assert_prints(source: &str, expected: &[&str]) {
    let (out, report, status) = run(source);
    assert!(
        report.is_empty(),
        "Expected no diagnostics, got: {:?}",
        report.diagnostics()
    );
    assert_eq!(status, RunStatus::Success);
    assert_eq!(out, expected);
}

/// Assert that `source` fails at runtime with `code`, after printing `printed`
pub fn assert_runtime_error(source: &str, code: &str, printed: &[&str]) -> Diagnostic {
    let (out, report, status) = run(source);
    assert_eq!(status, RunStatus::RuntimeError, "diagnostics: {:?}", report.diagnostics());
    assert!(report.had_runtime_error());
    assert!(!report.had_error());
    assert_eq!(out, printed);
    let diags = report.into_diagnostics();
    assert_eq!(diags.len(), 1, "exactly one runtime error per run");
    assert_eq!(diags[0].code, code);
    diags.into_iter().next().unwrap()
}

/// Assert that `source` fails to compile with exactly these classic messages
pub fn assert_compile_errors(source: &str, expected: &[&str]) {
    let (out, report, status) = run(source);
    assert_eq!(status, RunStatus::CompileError);
    assert!(out.is_empty(), "nothing may run after a compile error");
    let messages: Vec<String> = report
        .diagnostics()
        .iter()
        .map(|d| d.to_classic_string())
        .collect();
    assert_eq!(messages, expected);
}
