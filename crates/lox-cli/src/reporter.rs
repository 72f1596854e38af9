//! Diagnostics to the terminal
//!
//! Errors are written as soon as they are reported, in the configured
//! format: classic one-liners, rich human output, or one JSON object per line.

use crate::config::Settings;
use lox_config::DiagnosticsFormat;
use lox_runtime::diagnostic::formatter::extract_snippet;
use lox_runtime::{CompileError, Diagnostic, DiagnosticFormatter, Reporter, RuntimeError};
use std::io::Write;
use termcolor::{StandardStream, WriteColor};

pub struct TerminalReporter<W: WriteColor> {
    out: W,
    format: DiagnosticsFormat,
    formatter: DiagnosticFormatter,
    file: String,
    source: String,
    had_error: bool,
    had_runtime_error: bool,
}

impl TerminalReporter<StandardStream> {
    /// Reporter writing to stderr with the configured color choice
    pub fn stderr(settings: &Settings, file: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(
            StandardStream::stderr(settings.color.to_color_choice()),
            settings.format,
            file,
            source,
        )
    }
}

impl<W: WriteColor> TerminalReporter<W> {
    pub fn new(
        out: W,
        format: DiagnosticsFormat,
        file: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            out,
            format,
            formatter: DiagnosticFormatter::default(),
            file: file.into(),
            source: source.into(),
            had_error: false,
            had_runtime_error: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Write one diagnostic in the configured format
    pub fn emit(&mut self, diag: &Diagnostic) {
        // Nothing useful to do if stderr is gone
        let _ = match self.format {
            DiagnosticsFormat::Classic => writeln!(self.out, "{}", diag.to_classic_string()),
            DiagnosticsFormat::Human => self.formatter.write_diagnostic(&mut self.out, diag),
            DiagnosticsFormat::Json => match diag.to_json_compact() {
                Ok(json) => writeln!(self.out, "{}", json),
                Err(_) => writeln!(self.out, "{}", diag.to_classic_string()),
            },
        };
    }

    fn locate(&self, diag: Diagnostic) -> Diagnostic {
        let diag = diag.with_file(self.file.clone());
        match extract_snippet(&self.source, diag.line) {
            Some(snippet) => diag.with_snippet(snippet),
            None => diag,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: WriteColor> Reporter for TerminalReporter<W> {
    fn error(&mut self, error: &CompileError) {
        self.had_error = true;
        let diag = self.locate(Diagnostic::from_compile_error(error));
        self.emit(&diag);
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        self.had_runtime_error = true;
        let diag = self.locate(Diagnostic::from_runtime_error(error));
        self.emit(&diag);
    }
}
