//! Configuration file schema
//!
//! The same schema is used for the global file (`~/.lox/config.toml`) and
//! the project file (`lox.toml`). Every field is optional; unset fields fall
//! back to the next layer down.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Interactive prompt settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repl: Option<ReplSection>,

    /// Diagnostic output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<DiagnosticsSection>,

    /// Interpreter settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeSection>,

    /// Logging settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<LogSection>,
}

/// `[repl]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReplSection {
    /// Prompt string (default: "> ")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Persist line history between sessions (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<bool>,

    /// History file location (default: ~/.lox/history)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
}

/// `[diagnostics]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsSection {
    /// "classic", "human", or "json"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// "auto", "always", or "never"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// `[runtime]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSection {
    /// "unbound" or "nil"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uninitialized: Option<String>,
}

/// `[log]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// "error", "warn", "info", "debug", or "trace"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl ConfigFile {
    /// Load a configuration file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the enumerated string fields
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(diagnostics) = &self.diagnostics {
            if let Some(format) = &diagnostics.format {
                DiagnosticsFormat::from_field("diagnostics.format", format)?;
            }
            if let Some(color) = &diagnostics.color {
                ColorSetting::from_field("diagnostics.color", color)?;
            }
        }

        if let Some(uninitialized) = self.runtime.as_ref().and_then(|r| r.uninitialized.as_ref()) {
            UninitializedSetting::from_field("runtime.uninitialized", uninitialized)?;
        }

        if let Some(level) = self.log.as_ref().and_then(|l| l.level.as_ref()) {
            LogLevel::from_field("log.level", level)?;
        }

        if let Some(prompt) = self.repl.as_ref().and_then(|r| r.prompt.as_ref()) {
            if prompt.contains('\n') {
                return Err(ConfigError::InvalidValue {
                    field: "repl.prompt".to_string(),
                    reason: "must be a single line".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the global config file path (~/.lox/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".lox").join("config.toml"))
    }

    /// Merge another config into this one
    ///
    /// Field by field: any value set in `other` wins.
    pub fn merge(&mut self, other: &ConfigFile) {
        if let Some(repl) = &other.repl {
            let target = self.repl.get_or_insert_with(Default::default);
            overlay(&mut target.prompt, &repl.prompt);
            overlay(&mut target.history, &repl.history);
            overlay(&mut target.history_file, &repl.history_file);
        }
        if let Some(diagnostics) = &other.diagnostics {
            let target = self.diagnostics.get_or_insert_with(Default::default);
            overlay(&mut target.format, &diagnostics.format);
            overlay(&mut target.color, &diagnostics.color);
        }
        if let Some(runtime) = &other.runtime {
            let target = self.runtime.get_or_insert_with(Default::default);
            overlay(&mut target.uninitialized, &runtime.uninitialized);
        }
        if let Some(log) = &other.log {
            let target = self.log.get_or_insert_with(Default::default);
            overlay(&mut target.level, &log.level);
        }
    }
}

fn overlay<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

/// Declares a closed set of string choices for a config field
macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? } default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            /// Every accepted spelling
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            /// Parse a case-insensitive value
            pub fn parse(value: &str) -> Option<Self> {
                match value.to_ascii_lowercase().as_str() {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parse `value`, reporting `field` on failure
            pub fn from_field(field: &str, value: &str) -> ConfigResult<Self> {
                Self::parse(value).ok_or_else(|| ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!(
                        "must be one of {}, got '{}'",
                        Self::VALUES
                            .iter()
                            .map(|v| format!("'{}'", v))
                            .collect::<Vec<_>>()
                            .join(", "),
                        value
                    ),
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice! {
    /// How diagnostics are rendered
    DiagnosticsFormat { Classic => "classic", Human => "human", Json => "json" } default Classic
}

choice! {
    /// Terminal color usage
    ColorSetting { Auto => "auto", Always => "always", Never => "never" } default Auto
}

choice! {
    /// What `var x;` binds
    UninitializedSetting { Unbound => "unbound", Nil => "nil" } default Unbound
}

choice! {
    /// Log verbosity
    LogLevel {
        Error => "error",
        Warn => "warn",
        Info => "info",
        Debug => "debug",
        Trace => "trace",
    } default Warn
}
