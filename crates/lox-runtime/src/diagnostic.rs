//! Diagnostic system for errors
//!
//! Scanner and parser failures are `CompileError`s, evaluation failures are
//! `RuntimeError`s. Both flow through the [`Reporter`] trait; the default
//! implementation, [`DiagnosticReport`], converts them into the unified
//! [`Diagnostic`] type so the driver can render them in one place.

pub mod error_codes;
pub mod formatter;

use crate::token::{Token, TokenKind};
use crate::value::RuntimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic schema version
pub const DIAG_VERSION: u32 = 1;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Error that prevents or halts execution
    Error,
    /// Problem worth surfacing that does not stop the run
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "error"),
            DiagnosticLevel::Warning => write!(f, "warning"),
        }
    }
}

/// Pipeline phase a diagnostic originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Runtime,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical"),
            DiagnosticKind::Syntax => write!(f, "syntax"),
            DiagnosticKind::Runtime => write!(f, "runtime"),
        }
    }
}

/// Where on the line an error points: `at end`, `at 'x'`, or nothing
fn token_location(token: &Token) -> String {
    if token.kind == TokenKind::Eof {
        "at end".to_string()
    } else {
        format!("at '{}'", token.lexeme)
    }
}

/// Lexical or syntax error found before execution
///
/// Display renders the classic one-line form, e.g.
/// `[line 3] Error at ';': Expect expression.`
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    /// Scanner failure; there is no token to point at, only a line
    #[error("[line {line}] Error: {message}")]
    Lexical {
        line: usize,
        message: String,
        code: &'static str,
    },
    /// Parser failure attributed to the offending token
    #[error("[line {}] Error {}: {message}", .token.line, token_location(.token))]
    Syntax {
        token: Token,
        message: String,
        code: &'static str,
    },
}

impl CompileError {
    /// Scanner met a character outside the language's alphabet
    pub fn unexpected_character(line: usize) -> Self {
        CompileError::Lexical {
            line,
            message: "Unexpected character.".to_string(),
            code: error_codes::UNEXPECTED_CHARACTER,
        }
    }

    /// Input ended inside a string literal
    pub fn unterminated_string(line: usize) -> Self {
        CompileError::Lexical {
            line,
            message: "Unterminated string.".to_string(),
            code: error_codes::UNTERMINATED_STRING,
        }
    }

    /// Generic syntax error at `token`
    pub fn syntax(token: Token, message: impl Into<String>) -> Self {
        Self::syntax_with_code(token, message, error_codes::SYNTAX_ERROR)
    }

    /// Syntax error with a specific code
    pub fn syntax_with_code(
        token: Token,
        message: impl Into<String>,
        code: &'static str,
    ) -> Self {
        CompileError::Syntax {
            token,
            message: message.into(),
            code,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            CompileError::Lexical { line, .. } => *line,
            CompileError::Syntax { token, .. } => token.line,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CompileError::Lexical { message, .. } | CompileError::Syntax { message, .. } => {
                message
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Lexical { code, .. } | CompileError::Syntax { code, .. } => code,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            CompileError::Lexical { .. } => DiagnosticKind::Lexical,
            CompileError::Syntax { .. } => DiagnosticKind::Syntax,
        }
    }

    /// `at end` / `at 'x'` for syntax errors, empty for lexical ones
    pub fn location(&self) -> String {
        match self {
            CompileError::Lexical { .. } => String::new(),
            CompileError::Syntax { token, .. } => token_location(token),
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic schema version
    pub diag_version: u32,
    /// Severity level
    pub level: DiagnosticLevel,
    /// Phase that produced it
    pub kind: DiagnosticKind,
    /// Error code (e.g., "LX0002")
    pub code: String,
    /// Main diagnostic message
    pub message: String,
    /// File path
    pub file: String,
    /// Line number (1-based)
    pub line: usize,
    /// `at end`, `at 'x'`, or empty
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub location: String,
    /// Source line string
    pub snippet: String,
    /// Short label describing the offending token
    pub label: String,
    /// Suggested fix (optional)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic with code
    pub fn error_with_code(
        code: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            diag_version: DIAG_VERSION,
            level: DiagnosticLevel::Error,
            kind,
            code: code.into(),
            message: message.into(),
            file: "<unknown>".to_string(),
            line,
            location: String::new(),
            snippet: String::new(),
            label: String::new(),
            help: None,
        }
    }

    /// Diagnostic for a scanner or parser error
    pub fn from_compile_error(error: &CompileError) -> Self {
        let mut diag =
            Self::error_with_code(error.code(), error.kind(), error.message(), error.line())
                .with_location(error.location());
        if let CompileError::Syntax { token, .. } = error {
            diag = diag.with_label(label_for(token));
        }
        diag.with_default_help()
    }

    /// Diagnostic for an evaluation error
    pub fn from_runtime_error(error: &RuntimeError) -> Self {
        let token = error.token();
        let code = match error {
            RuntimeError::OperandNotNumber { .. }
            | RuntimeError::OperandsNotNumbers { .. }
            | RuntimeError::InvalidAddOperands { .. } => error_codes::TYPE_MISMATCH,
            RuntimeError::UndefinedVariable { .. } => error_codes::UNDEFINED_VARIABLE,
            RuntimeError::Unsupported { .. } => error_codes::UNSUPPORTED_FEATURE,
            RuntimeError::InvalidOperator { .. } => error_codes::INVALID_OPERATOR,
        };
        Self::error_with_code(code, DiagnosticKind::Runtime, error.to_string(), token.line)
            .with_location(token_location(token))
            .with_label(label_for(token))
            .with_default_help()
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the location text
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the snippet (source line)
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a help message
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn with_default_help(mut self) -> Self {
        if self.help.is_none() {
            self.help = error_codes::help_for(&self.code).map(str::to_string);
        }
        self
    }

    /// Format in the classic one-line form
    ///
    /// Compile errors: `[line 1] Error at ';': Expect expression.`
    /// Runtime errors: the message followed by `\n[line N]`.
    pub fn to_classic_string(&self) -> String {
        match self.kind {
            DiagnosticKind::Runtime => format!("{}\n[line {}]", self.message, self.line),
            DiagnosticKind::Lexical | DiagnosticKind::Syntax => {
                if self.location.is_empty() {
                    format!("[line {}] Error: {}", self.line, self.message)
                } else {
                    format!(
                        "[line {}] Error {}: {}",
                        self.line, self.location, self.message
                    )
                }
            }
        }
    }

    /// Format as human-readable string
    pub fn to_human_string(&self) -> String {
        let mut output = String::new();

        // Header: error[LX0002]: Undefined variable 'x'.
        output.push_str(&format!(
            "{}[{}]: {}\n",
            self.level, self.code, self.message
        ));

        // Location: --> script.lox:12 at 'x'
        output.push_str(&format!("  --> {}:{}", self.file, self.line));
        if !self.location.is_empty() {
            output.push_str(&format!(" {}", self.location));
        }
        output.push('\n');

        if !self.snippet.is_empty() {
            output.push_str("   |\n");
            output.push_str(&format!("{:>2} | {}\n", self.line, self.snippet));
            output.push_str("   |");
            if !self.label.is_empty() {
                output.push_str(&format!(" {}", self.label));
            }
            output.push('\n');
        }

        if let Some(help) = &self.help {
            output.push_str(&format!("   = help: {}\n", help));
        }

        output
    }

    /// Format as JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as compact JSON string
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn label_for(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        kind => format!("{} `{}`", describe_kind(kind), token.lexeme),
    }
}

fn describe_kind(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Identifier => "identifier",
        TokenKind::String => "string",
        TokenKind::Number => "number",
        k if TokenKind::is_keyword(k.as_str()).is_some() => "keyword",
        _ => "token",
    }
}

/// Receiver for every error the pipeline produces
///
/// Exactly two entry points: one for errors found before execution, one for
/// errors raised while executing.
pub trait Reporter {
    /// A lexical or syntax error
    fn error(&mut self, error: &CompileError);

    /// A runtime error; at most one per run
    fn runtime_error(&mut self, error: &RuntimeError);
}

/// Accumulating reporter that turns errors into [`Diagnostic`]s
///
/// One report covers one run. Its flags drive the driver's exit code.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticReport {
    file: Option<String>,
    source: Option<String>,
    diagnostics: Vec<Diagnostic>,
    had_error: bool,
    had_runtime_error: bool,
}

impl DiagnosticReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that attaches `file` and source snippets to every diagnostic
    pub fn for_source(file: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// True once any lexical or syntax error was reported
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// True once a runtime error was reported
    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn push(&mut self, mut diag: Diagnostic) {
        if let Some(file) = &self.file {
            diag = diag.with_file(file.clone());
        }
        if let Some(line) = self
            .source
            .as_deref()
            .and_then(|src| formatter::extract_snippet(src, diag.line))
        {
            diag = diag.with_snippet(line);
        }
        self.diagnostics.push(diag);
    }
}

impl Reporter for DiagnosticReport {
    fn error(&mut self, error: &CompileError) {
        self.had_error = true;
        self.push(Diagnostic::from_compile_error(error));
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        self.had_runtime_error = true;
        self.push(Diagnostic::from_runtime_error(error));
    }
}
