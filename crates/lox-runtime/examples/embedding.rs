//! Embedding example
//!
//! Runs Lox source inside a host program with a custom print sink and a
//! custom error reporter, and shows that globals persist across runs.
//!
//! Run with: cargo run --example embedding -p lox-runtime

use lox_runtime::{CompileError, Lox, PrintSink, Reporter, RunStatus, RuntimeError};

/// Prefixes every line the script prints
struct Prefixed(&'static str);

impl PrintSink for Prefixed {
    fn print(&mut self, text: &str) {
        println!("{}{}", self.0, text);
    }
}

/// Counts errors and echoes them in the classic format
#[derive(Default)]
struct Counting {
    errors: usize,
}

impl Reporter for Counting {
    fn error(&mut self, error: &CompileError) {
        self.errors += 1;
        eprintln!("{}", error);
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        self.errors += 1;
        eprintln!("{}\n[line {}]", error, error.line());
    }
}

fn main() {
    let mut lox = Lox::new();
    let mut out = Prefixed("lox| ");
    let mut reporter = Counting::default();

    let programs = [
        "var greeting = \"hello\";",
        "print greeting + \", world\";",
        "print greeting - 1;",
        "print \"still running\";",
    ];

    for source in programs {
        let status = lox.run(source, &mut out, &mut reporter);
        if status != RunStatus::Success {
            println!("  ({:?})", status);
        }
    }

    println!("{} error(s) reported", reporter.errors);
}
