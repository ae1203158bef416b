//! TOML configuration parsing and management.

use crate::adapter::{AdapterOptions, FAILURE_EXIT_CODE, USAGE_EXIT_CODE};
use crate::config::EnvironmentLoader;
use crate::error::{CommanderError, CommanderResult};
use crate::parser::ParserOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOG_LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommanderConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Program identity shown in usage lines and `--version`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: None,
            about: None,
        }
    }
}

fn default_app_name() -> String {
    "commander".to_string()
}

fn default_true() -> bool {
    true
}

/// Flag recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsingConfig {
    #[serde(default = "default_true")]
    pub kebab_case_flags: bool,
    #[serde(default = "default_true")]
    pub negated_flags: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            kebab_case_flags: true,
            negated_flags: true,
        }
    }
}

/// Output and exit codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_usage_exit_code")]
    pub usage_exit_code: i32,
    #[serde(default = "default_failure_exit_code")]
    pub failure_exit_code: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            usage_exit_code: USAGE_EXIT_CODE,
            failure_exit_code: FAILURE_EXIT_CODE,
        }
    }
}

fn default_usage_exit_code() -> i32 {
    USAGE_EXIT_CODE
}

fn default_failure_exit_code() -> i32 {
    FAILURE_EXIT_CODE
}

/// Run log configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Markdown run log; no log is written when unset.
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl CommanderConfig {
    /// Options for every adapter built under this configuration.
    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            parser: ParserOptions {
                kebab_case_flags: self.parsing.kebab_case_flags,
                negated_flags: self.parsing.negated_flags,
            },
            color: self.output.color,
            usage_exit_code: self.output.usage_exit_code,
            failure_exit_code: self.output.failure_exit_code,
            program_name: None,
        }
    }

    /// The run log path with `~` and environment variables expanded.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        let raw = self.logging.log_file.as_deref()?;
        let expanded = shellexpand::full(raw)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| shellexpand::tilde(raw).into_owned());
        Some(PathBuf::from(expanded))
    }

    /// Apply environment overrides: `NO_COLOR`, `COMMANDER_LOG_FILE` and
    /// `COMMANDER_LOG_LEVEL`.
    pub fn apply_environment(&mut self, env: &EnvironmentLoader) {
        if env.no_color() {
            self.output.color = false;
        }
        if let Some(log_file) = env.log_file() {
            self.logging.log_file = Some(log_file);
        }
        if let Some(log_level) = env.log_level() {
            self.logging.log_level = log_level;
        }
    }

    /// Check values serde cannot check.
    pub fn validate(&self) -> CommanderResult<()> {
        if self.app.name.trim().is_empty() {
            return Err(CommanderError::config("app.name must not be empty"));
        }
        if self.output.usage_exit_code == 0 || self.output.failure_exit_code == 0 {
            return Err(CommanderError::config("exit codes for errors must be non-zero"));
        }
        if !LOG_LEVELS.contains(&self.logging.log_level.to_uppercase().as_str()) {
            return Err(CommanderError::config(format!(
                "unknown log level '{}', expected one of {}",
                self.logging.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Loads and manages TOML configuration.
#[derive(Debug)]
pub struct ConfigurationLoader {
    pub config_path: PathBuf,
    pub config: CommanderConfig,
}

impl ConfigurationLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to TOML config file. If None, uses the default
    ///   location for `commander`. A missing file yields the default config.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        Self::for_app(&default_app_name(), config_path)
    }

    /// Initialize configuration loader for a named program.
    ///
    /// The default location is `<config dir>/<app>/<app>.toml`, and the
    /// default config carries `app` as its name.
    pub fn for_app(app: &str, config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| Self::default_config_path(app));

        let config = if config_path.exists() {
            debug!(path = %config_path.display(), "loading configuration");
            Self::load_config(&config_path)?
        } else {
            debug!(path = %config_path.display(), "no configuration file, using defaults");
            let mut config = Self::get_default_config();
            config.app.name = app.to_string();
            config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Default config file location for `app`.
    pub fn default_config_path(app: &str) -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(app))
            .unwrap_or_else(|| PathBuf::from(app))
            .join(format!("{}.toml", app))
    }

    /// Apply environment overrides and re-validate.
    pub fn with_environment(mut self, env: &EnvironmentLoader) -> Result<Self> {
        self.config.apply_environment(env);
        self.config
            .validate()
            .context("Invalid configuration after environment overrides")?;
        Ok(self)
    }

    /// Load configuration from TOML file.
    fn load_config(path: &Path) -> Result<CommanderConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CommanderConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Get default configuration.
    pub fn get_default_config() -> CommanderConfig {
        CommanderConfig::default()
    }

    /// Get configuration value by dot-notation key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match key {
            "app.name" => Some(self.config.app.name.clone()),
            "app.version" => self.config.app.version.clone(),
            "app.about" => self.config.app.about.clone(),
            "logging.log_file" => self.config.logging.log_file.clone(),
            "logging.log_level" => Some(self.config.logging.log_level.clone()),
            _ => None,
        }
    }

    /// Get boolean configuration value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            "parsing.kebab_case_flags" => Some(self.config.parsing.kebab_case_flags),
            "parsing.negated_flags" => Some(self.config.parsing.negated_flags),
            "output.color" => Some(self.config.output.color),
            _ => None,
        }
    }

    /// Get numeric configuration value.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match key {
            "output.usage_exit_code" => Some(i64::from(self.config.output.usage_exit_code)),
            "output.failure_exit_code" => Some(i64::from(self.config.output.failure_exit_code)),
            _ => None,
        }
    }
}
