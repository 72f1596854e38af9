use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod logger;
mod reporter;

use commands::{EXIT_IOERR, EXIT_SOFTWARE, EXIT_USAGE};

/// Lox scripting language interpreter.
///
/// Runs a script, or starts an interactive prompt when no script is given.
///
/// EXAMPLES:
///     lox                          Start the interactive prompt
///     lox hello.lox                Run a script
///     lox --dump-ast hello.lox     Show how a script parses
///     lox --format human main.lox  Rich diagnostics
///
/// EXIT CODES:
///     0   success
///     64  usage or configuration error
///     65  lexical or syntax error
///     70  runtime error
///     74  script could not be read
///
/// ENVIRONMENT VARIABLES:
///     LOX_DIAGNOSTICS   Diagnostic format (classic, human, json)
///     LOX_NO_HISTORY    Set to '1' to disable REPL history
///     LOX_LOG           Log level (error, warn, info, debug, trace)
///     NO_COLOR          Set to disable colored output
#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(version)]
pub struct Cli {
    /// Script to run
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Scan the script and print one token per line
    #[arg(long, requires = "script", conflicts_with = "dump_ast")]
    pub dump_tokens: bool,

    /// Parse the script and print its syntax tree
    #[arg(long, requires = "script")]
    pub dump_ast: bool,

    /// Diagnostic output format
    #[arg(long, value_enum, value_name = "FMT")]
    pub format: Option<FormatArg>,

    /// Use this configuration file instead of searching for lox.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable history persistence (for privacy)
    #[arg(long)]
    pub no_history: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Classic,
    Human,
    Json,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not errors
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let settings = config::Settings::resolve(&cli)?;
    logger::init(settings.log_level);

    match &cli.script {
        Some(path) if cli.dump_tokens => commands::dump::tokens(path, &settings),
        Some(path) if cli.dump_ast => commands::dump::ast(path, &settings),
        Some(path) => commands::run::run(path, &settings),
        None => commands::repl::run(&settings),
    }
}

/// Map a driver failure to its exit code
fn exit_code_for(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<lox_config::ConfigError>().is_some() {
        EXIT_USAGE
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        EXIT_IOERR
    } else {
        EXIT_SOFTWARE
    }
}
