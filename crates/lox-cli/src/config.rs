//! Effective driver settings
//!
//! CLI flags layered over the merged file and environment configuration
//! from `lox-config`.

use crate::{Cli, FormatArg};
use anyhow::Result;
use log::LevelFilter;
use lox_config::{
    ColorSetting, Config, ConfigLoader, DiagnosticsFormat, LogLevel, UninitializedSetting,
};
use lox_runtime::{ColorMode, InterpreterOptions, UninitializedPolicy};
use std::path::PathBuf;

/// Settings for one invocation of `lox`
#[derive(Debug, Clone)]
pub struct Settings {
    pub format: DiagnosticsFormat,
    pub color: ColorMode,
    pub interpreter: InterpreterOptions,
    pub prompt: String,
    /// `None` when history persistence is disabled
    pub history_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Settings {
    /// Load configuration and apply the command line on top
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut loader = ConfigLoader::new();
        let config = match &cli.config {
            Some(path) => loader.load_from_file(path)?,
            None => loader.load_from_directory(&std::env::current_dir()?)?,
        };
        Ok(Self::from_config(&config, cli))
    }

    pub fn from_config(config: &Config, cli: &Cli) -> Self {
        let format = match cli.format {
            Some(FormatArg::Classic) => DiagnosticsFormat::Classic,
            Some(FormatArg::Human) => DiagnosticsFormat::Human,
            Some(FormatArg::Json) => DiagnosticsFormat::Json,
            None => config.diagnostics_format(),
        };

        let color = match config.color() {
            ColorSetting::Auto => ColorMode::Auto,
            ColorSetting::Always => ColorMode::Always,
            ColorSetting::Never => ColorMode::Never,
        };

        let uninitialized = match config.uninitialized() {
            UninitializedSetting::Unbound => UninitializedPolicy::Unbound,
            UninitializedSetting::Nil => UninitializedPolicy::Nil,
        };

        let history_file = if cli.no_history || !config.history_enabled() {
            None
        } else {
            config.history_file()
        };

        // -v flags only ever raise verbosity
        let log_level = level_filter(config.log_level()).max(verbosity_filter(cli.verbose));

        Self {
            format,
            color,
            interpreter: InterpreterOptions { uninitialized },
            prompt: config.prompt().to_string(),
            history_file,
            log_level,
        }
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

fn verbosity_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
