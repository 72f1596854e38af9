//! Token and AST dumps
//!
//! With `--format json` both dumps are machine readable: the token list as a
//! JSON array, the tree as a versioned AST document.

use crate::commands::{read_script, EXIT_DATAERR, EXIT_OK};
use crate::config::Settings;
use crate::reporter::TerminalReporter;
use anyhow::Result;
use lox_config::DiagnosticsFormat;
use lox_runtime::{parse_source, scan, AstPrinter, Program, Reporter, Token, VersionedProgram};
use std::path::Path;

/// Print every token of the script, one per line
///
/// Lexical errors are reported but the tokens that were recognized are
/// still printed.
pub fn tokens(path: &Path, settings: &Settings) -> Result<u8> {
    let source = read_script(path)?;
    let (tokens, errors) = scan(&source);

    let mut reporter = TerminalReporter::stderr(settings, path.display().to_string(), source.as_str());
    for error in &errors {
        reporter.error(error);
    }

    println!("{}", render_tokens(&tokens, settings.format)?);

    Ok(if errors.is_empty() { EXIT_OK } else { EXIT_DATAERR })
}

/// Print the parsed program
///
/// Nothing is printed to stdout if the script has lexical or syntax errors.
pub fn ast(path: &Path, settings: &Settings) -> Result<u8> {
    let source = read_script(path)?;
    let (statements, errors) = parse_source(&source);

    if !errors.is_empty() {
        let mut reporter =
            TerminalReporter::stderr(settings, path.display().to_string(), source.as_str());
        for error in &errors {
            reporter.error(error);
        }
        return Ok(EXIT_DATAERR);
    }

    let rendered = match settings.format {
        DiagnosticsFormat::Json => VersionedProgram::new(Program::from(statements)).to_json()?,
        _ => AstPrinter::new().program(&statements),
    };
    println!("{}", rendered);

    Ok(EXIT_OK)
}

fn render_tokens(tokens: &[Token], format: DiagnosticsFormat) -> Result<String> {
    Ok(match format {
        DiagnosticsFormat::Json => serde_json::to_string_pretty(tokens)?,
        _ => tokens
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    })
}
