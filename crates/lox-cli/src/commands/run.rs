//! Run command - execute a Lox script

use crate::commands::{exit_code, read_script};
use crate::config::Settings;
use crate::reporter::TerminalReporter;
use anyhow::Result;
use log::info;
use lox_runtime::{Lox, StdoutSink};
use std::path::Path;

/// Run a script file, returning the process exit code
///
/// Prints go to stdout as they happen; diagnostics go to stderr.
pub fn run(path: &Path, settings: &Settings) -> Result<u8> {
    let source = read_script(path)?;
    info!("running {} ({} bytes)", path.display(), source.len());

    let mut lox = Lox::with_options(settings.interpreter);
    let mut reporter = TerminalReporter::stderr(settings, path.display().to_string(), source.as_str());
    let status = lox.run(&source, &mut StdoutSink, &mut reporter);

    Ok(exit_code(status))
}
