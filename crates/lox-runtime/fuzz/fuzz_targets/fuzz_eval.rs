//! Interpreter stability fuzzer
//!
//! Any program that parses must run to completion or stop with a runtime
//! error; the scope chain must be back at the globals afterwards.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lox_runtime::{DiagnosticReport, Lox, RunStatus};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Loops can legitimately run forever
    if input.contains("while") || input.contains("for") {
        return;
    }

    let mut lox = Lox::new();
    let mut out: Vec<String> = Vec::new();
    let mut report = DiagnosticReport::new();
    let status = lox.run(input, &mut out, &mut report);

    match status {
        RunStatus::Success => assert!(report.is_empty()),
        RunStatus::CompileError => assert!(out.is_empty() && report.had_error()),
        RunStatus::RuntimeError => assert_eq!(report.diagnostics().len(), 1),
    }
    assert_eq!(lox.interpreter().environment().depth(), 0);
});
