//! REPL command implementation

use crate::commands::EXIT_OK;
use crate::config::Settings;
use crate::reporter::TerminalReporter;
use anyhow::Result;
use log::{debug, warn};
use lox_runtime::{PrintSink, ReplCore, ReplResult, StdoutSink};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// What the loop should do after a line
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
}

/// Run the interactive prompt until `:quit` or end of input
pub fn run(settings: &Settings) -> Result<u8> {
    let mut rl = DefaultEditor::new()?;
    let mut repl = ReplCore::with_options(settings.interpreter);

    if let Some(path) = &settings.history_file {
        // A missing history file is normal on first use
        if rl.load_history(path).is_err() {
            debug!("no history loaded from {}", path.display());
        }
    }

    println!("Lox v{} REPL", lox_runtime::VERSION);
    println!("Type statements to run them, :help for commands, :quit to exit");
    println!();

    loop {
        match rl.readline(&settings.prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                if handle_line(&mut repl, &line, settings, &mut StdoutSink) == Action::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                println!("Use :quit or Ctrl-D to exit");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("Goodbye!");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = &settings.history_file {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(err) = rl.save_history(path) {
            warn!("could not save history to {}: {}", path.display(), err);
        }
    }

    Ok(EXIT_OK)
}

fn handle_line(
    repl: &mut ReplCore,
    line: &str,
    settings: &Settings,
    out: &mut dyn PrintSink,
) -> Action {
    match line.trim() {
        ":quit" | ":q" => {
            println!("Goodbye!");
            return Action::Quit;
        }
        ":reset" => {
            repl.reset();
            println!("REPL state reset");
        }
        ":help" | ":h" => print_help(),
        ":vars" | ":v" => print_vars(repl),
        command if command.starts_with(':') => {
            println!("Unknown command '{}'. Type :help for a list.", command);
        }
        _ => {
            // Prints go to `out` as they happen, not after the line finishes
            let result = repl.eval_line_to(line, out);
            show_diagnostics(&result, line, settings);
        }
    }
    Action::Continue
}

fn show_diagnostics(result: &ReplResult, line: &str, settings: &Settings) {
    let mut reporter = TerminalReporter::stderr(settings, "<repl>", line);
    for diag in &result.diagnostics {
        reporter.emit(diag);
    }
}

/// Print help information
fn print_help() {
    println!("Lox REPL Commands:");
    println!("  :quit, :q         Exit the REPL");
    println!("  :reset            Clear all global variables");
    println!("  :help, :h         Show this help message");
    println!("  :vars, :v         List global variables and their values");
    println!();
    println!("Anything else is run as Lox source. Globals persist between lines.");
    println!("Examples:");
    println!("  > var x = 40;");
    println!("  > print x + 2;");
}

fn print_vars(repl: &ReplCore) {
    let vars = repl.variables();
    if vars.is_empty() {
        println!("No variables defined.");
        return;
    }

    println!("{:<16} {:<8} {}", "name", "type", "value");
    println!("{}", "-".repeat(40));
    for (name, value) in &vars {
        println!("{:<16} {:<8} {}", name, value.type_name(), value);
    }
}
