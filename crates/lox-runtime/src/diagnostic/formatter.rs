//! Color-aware diagnostic formatter
//!
//! Renders diagnostics with the source line and optional terminal colors.
//! Respects the NO_COLOR environment variable.

use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Color mode for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Never use colors
    Never,
    /// Auto-detect terminal capabilities
    #[default]
    Auto,
}

impl ColorMode {
    /// Parse `auto` / `always` / `never`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Resolve to a termcolor ColorChoice
    pub fn to_color_choice(self) -> ColorChoice {
        // Always respect NO_COLOR (https://no-color.org)
        if std::env::var("NO_COLOR").is_ok() {
            return ColorChoice::Never;
        }
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => ColorChoice::Auto,
        }
    }
}

/// Diagnostic formatter with color support
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticFormatter {
    color_mode: ColorMode,
}

impl DiagnosticFormatter {
    /// Create a new formatter with the given color mode
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    /// Create a plain (no color) formatter
    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    /// Format a diagnostic with colors to stderr
    pub fn emit(&self, diag: &Diagnostic) {
        let mut stream = StandardStream::stderr(self.color_mode.to_color_choice());
        let _ = self.write_diagnostic(&mut stream, diag);
    }

    /// Format a diagnostic with colors to a WriteColor sink
    pub fn write_diagnostic(
        &self,
        w: &mut impl WriteColor,
        diag: &Diagnostic,
    ) -> std::io::Result<()> {
        self.write_header(w, diag)?;
        self.write_location(w, diag)?;

        if !diag.snippet.is_empty() {
            self.write_snippet(w, diag)?;
        }

        if let Some(help) = &diag.help {
            self.write_help(w, help)?;
        }

        writeln!(w)?;
        Ok(())
    }

    fn level_color(level: DiagnosticLevel) -> Color {
        match level {
            DiagnosticLevel::Error => Color::Red,
            DiagnosticLevel::Warning => Color::Yellow,
        }
    }

    fn write_header(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> std::io::Result<()> {
        w.set_color(
            ColorSpec::new()
                .set_fg(Some(Self::level_color(diag.level)))
                .set_bold(true),
        )?;
        write!(w, "{}[{}]", diag.level, diag.code)?;
        w.reset()?;

        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, ": {}", diag.message)?;
        w.reset()?;
        writeln!(w)?;
        Ok(())
    }

    fn write_location(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> std::io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(w, "  --> ")?;
        w.reset()?;
        write!(w, "{}:{}", diag.file, diag.line)?;
        if !diag.location.is_empty() {
            write!(w, " {}", diag.location)?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn write_snippet(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> std::io::Result<()> {
        let gutter_width = diag.line.to_string().len() + 1;
        let gutter = ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true).clone();

        w.set_color(&gutter)?;
        writeln!(w, "{:>width$}|", "", width = gutter_width)?;
        write!(w, "{:>width$}| ", diag.line, width = gutter_width)?;
        w.reset()?;
        writeln!(w, "{}", diag.snippet)?;

        w.set_color(&gutter)?;
        write!(w, "{:>width$}|", "", width = gutter_width)?;
        w.reset()?;
        if !diag.label.is_empty() {
            w.set_color(
                ColorSpec::new()
                    .set_fg(Some(Self::level_color(diag.level)))
                    .set_bold(true),
            )?;
            write!(w, " {}", diag.label)?;
            w.reset()?;
        }
        writeln!(w)?;
        Ok(())
    }

    fn write_help(&self, w: &mut impl WriteColor, help: &str) -> std::io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(w, "   = ")?;
        w.reset()?;

        w.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(w, "help")?;
        w.reset()?;

        writeln!(w, ": {}", help)?;
        Ok(())
    }

    /// Format multiple diagnostics
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Format a diagnostic to a buffer (for testing)
    pub fn format_to_buffer(&self, diag: &Diagnostic) -> Vec<u8> {
        let mut buf = termcolor::Buffer::no_color();
        let _ = self.write_diagnostic(&mut buf, diag);
        buf.into_inner()
    }
}

/// Source line `line` (1-based), if it exists
pub fn extract_snippet(source: &str, line: usize) -> Option<String> {
    if line == 0 {
        return None;
    }
    source.lines().nth(line - 1).map(String::from)
}
