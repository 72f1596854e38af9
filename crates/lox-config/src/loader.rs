//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::file::{
    ColorSetting, ConfigFile, DiagnosticsFormat, LogLevel, UninitializedSetting,
};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "lox.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.lox/config.toml) - lowest priority
/// 2. Project config (./lox.toml) - overrides global
/// 3. Environment variables (LOX_*) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Effective settings after merging every layer
    pub settings: ConfigFile,

    /// Project root directory (where lox.toml was found)
    pub project_root: Option<PathBuf>,

    /// Files that contributed, lowest priority first
    pub sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use `path` instead of ~/.lox/config.toml
    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find lox.toml, layers it over the
    /// global config, then applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let mut config = self.load_global_layer()?;

        if let Some((root, path)) = find_project_config(start_dir) {
            config.settings.merge(&ConfigFile::load_from_file(&path)?);
            config.sources.push(path);
            config.project_root = Some(root);
        }

        apply_env_overrides(&mut config.settings)?;
        Ok(config)
    }

    /// Load configuration from an explicit file instead of searching for lox.toml
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let mut config = self.load_global_layer()?;

        config.settings.merge(&ConfigFile::load_from_file(config_path)?);
        config.sources.push(config_path.to_path_buf());
        config.project_root = config_path.parent().map(|p| p.to_path_buf());

        apply_env_overrides(&mut config.settings)?;
        Ok(config)
    }

    fn load_global_layer(&mut self) -> ConfigResult<Config> {
        let mut config = Config::default();
        let Some(path) = self.global_path() else {
            return Ok(config);
        };

        // Global config is optional
        if path.exists() {
            config.settings = ConfigFile::load_from_file(&path)?;
            config.sources.push(path);
        }
        Ok(config)
    }

    fn global_path(&mut self) -> Option<PathBuf> {
        if self.global_config_path.is_none() {
            // No home directory simply means no global layer
            self.global_config_path = ConfigFile::global_config_path().ok();
        }
        self.global_config_path.clone()
    }

    /// Get the global configuration directory (~/.lox)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".lox"))
    }

    /// Ensure global configuration directory exists
    pub fn ensure_global_config_dir() -> ConfigResult<PathBuf> {
        let dir = Self::global_config_dir()?;
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Find lox.toml by walking up the directory tree
///
/// Returns (project_root, config_path)
fn find_project_config(start_dir: &Path) -> Option<(PathBuf, PathBuf)> {
    start_dir.ancestors().find_map(|dir| {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        config_path
            .is_file()
            .then(|| (dir.to_path_buf(), config_path))
    })
}

/// Apply environment variable overrides
///
/// - LOX_PROMPT, LOX_HISTORY_FILE: taken verbatim
/// - LOX_NO_HISTORY: any truthy value disables history
/// - LOX_DIAGNOSTICS, LOX_UNINITIALIZED, LOX_LOG: validated like their file fields
fn apply_env_overrides(config: &mut ConfigFile) -> ConfigResult<()> {
    if let Ok(prompt) = env::var("LOX_PROMPT") {
        config.repl.get_or_insert_with(Default::default).prompt = Some(prompt);
    }

    if let Ok(value) = env::var("LOX_NO_HISTORY") {
        if is_truthy(&value) {
            config.repl.get_or_insert_with(Default::default).history = Some(false);
        }
    }

    if let Ok(path) = env::var("LOX_HISTORY_FILE") {
        config.repl.get_or_insert_with(Default::default).history_file = Some(PathBuf::from(path));
    }

    if let Ok(format) = env::var("LOX_DIAGNOSTICS") {
        DiagnosticsFormat::from_field("LOX_DIAGNOSTICS", &format)?;
        config.diagnostics.get_or_insert_with(Default::default).format = Some(format);
    }

    if let Ok(uninitialized) = env::var("LOX_UNINITIALIZED") {
        UninitializedSetting::from_field("LOX_UNINITIALIZED", &uninitialized)?;
        config.runtime.get_or_insert_with(Default::default).uninitialized = Some(uninitialized);
    }

    if let Ok(level) = env::var("LOX_LOG") {
        LogLevel::from_field("LOX_LOG", &level)?;
        config.log.get_or_insert_with(Default::default).level = Some(level);
    }

    Ok(())
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl Config {
    /// REPL prompt (default: "> ")
    pub fn prompt(&self) -> &str {
        self.settings
            .repl
            .as_ref()
            .and_then(|r| r.prompt.as_deref())
            .unwrap_or("> ")
    }

    /// Whether REPL history is persisted (default: true)
    pub fn history_enabled(&self) -> bool {
        self.settings
            .repl
            .as_ref()
            .and_then(|r| r.history)
            .unwrap_or(true)
    }

    /// History file: configured path, else ~/.lox/history
    pub fn history_file(&self) -> Option<PathBuf> {
        self.settings
            .repl
            .as_ref()
            .and_then(|r| r.history_file.clone())
            .or_else(|| {
                ConfigLoader::global_config_dir()
                    .ok()
                    .map(|dir| dir.join("history"))
            })
    }

    pub fn diagnostics_format(&self) -> DiagnosticsFormat {
        self.settings
            .diagnostics
            .as_ref()
            .and_then(|d| d.format.as_deref())
            .and_then(DiagnosticsFormat::parse)
            .unwrap_or_default()
    }

    pub fn color(&self) -> ColorSetting {
        self.settings
            .diagnostics
            .as_ref()
            .and_then(|d| d.color.as_deref())
            .and_then(ColorSetting::parse)
            .unwrap_or_default()
    }

    pub fn uninitialized(&self) -> UninitializedSetting {
        self.settings
            .runtime
            .as_ref()
            .and_then(|r| r.uninitialized.as_deref())
            .and_then(UninitializedSetting::parse)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> LogLevel {
        self.settings
            .log
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .and_then(LogLevel::parse)
            .unwrap_or_default()
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if this is a project (has lox.toml)
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        fs::write(&config_path, content).unwrap();
        config_path
    }

    fn isolated_loader(temp_dir: &TempDir) -> ConfigLoader {
        ConfigLoader::with_global_path(temp_dir.path().join("no-global.toml"))
    }

    #[test]
    #[serial]
    fn test_load_project_config() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[repl]
prompt = "project> "
"#,
        );

        let config = isolated_loader(&temp_dir)
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert_eq!(config.prompt(), "project> ");
        assert!(config.is_project());
    }

    #[test]
    #[serial]
    fn test_find_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(temp_dir.path(), "[log]\nlevel = \"info\"\n");

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let config = isolated_loader(&temp_dir)
            .load_from_directory(&sub_dir)
            .unwrap();

        assert_eq!(config.log_level(), LogLevel::Info);
        assert_eq!(config.project_root(), Some(temp_dir.path()));
    }

    #[test]
    #[serial]
    fn test_no_project_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let config = isolated_loader(&temp_dir)
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert!(!config.is_project());
        assert_eq!(config.prompt(), "> ");
        assert!(config.history_enabled());
        assert_eq!(config.diagnostics_format(), DiagnosticsFormat::Classic);
        assert_eq!(config.uninitialized(), UninitializedSetting::Unbound);
        assert_eq!(config.log_level(), LogLevel::Warn);
    }

    #[test]
    #[serial]
    fn test_env_override_prompt() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(temp_dir.path(), "[repl]\nprompt = \"file> \"\n");

        env::set_var("LOX_PROMPT", "env> ");
        let config = isolated_loader(&temp_dir)
            .load_from_directory(temp_dir.path())
            .unwrap();
        env::remove_var("LOX_PROMPT");

        assert_eq!(config.prompt(), "env> ");
    }

    #[test]
    #[serial]
    fn test_env_override_rejects_bad_value() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("LOX_UNINITIALIZED", "zero");
        let result = isolated_loader(&temp_dir).load_from_directory(temp_dir.path());
        env::remove_var("LOX_UNINITIALIZED");

        match result {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "LOX_UNINITIALIZED"),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy("Yes"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
