pub mod dump;
pub mod repl;
pub mod run;

use anyhow::{Context, Result};
use lox_runtime::RunStatus;
use std::fs;
use std::path::Path;

// Exit codes, following sysexits.h
pub const EXIT_OK: u8 = 0;
pub const EXIT_USAGE: u8 = 64;
pub const EXIT_DATAERR: u8 = 65;
pub const EXIT_SOFTWARE: u8 = 70;
pub const EXIT_IOERR: u8 = 74;

/// Exit code for a finished run
pub fn exit_code(status: RunStatus) -> u8 {
    match status {
        RunStatus::Success => EXIT_OK,
        RunStatus::CompileError => EXIT_DATAERR,
        RunStatus::RuntimeError => EXIT_SOFTWARE,
    }
}

/// Read a script, keeping the io::Error reachable for exit code mapping
pub fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))
}
