//! Environment variable loading and overrides.

use std::env;
use std::path::Path;
use tracing::warn;

/// Run log path override.
pub const LOG_FILE_VAR: &str = "COMMANDER_LOG_FILE";

/// Run log level override.
pub const LOG_LEVEL_VAR: &str = "COMMANDER_LOG_LEVEL";

/// Loads environment variables from a .env file and the system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to a .env file. Only an explicit path is loaded.
    pub fn new(env_file: Option<&Path>) -> Self {
        if let Some(path) = env_file {
            if path.exists() {
                if let Err(e) = dotenv::from_path(path) {
                    warn!(path = %path.display(), error = %e, "failed to load .env file");
                }
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// The .env file this loader was created with.
    pub fn env_file(&self) -> Option<&str> {
        self.env_file.as_deref()
    }

    /// Whether `NO_COLOR` is set to a non-empty value.
    pub fn no_color(&self) -> bool {
        env::var_os("NO_COLOR").map_or(false, |v| !v.is_empty())
    }

    /// Run log path from `COMMANDER_LOG_FILE`.
    pub fn log_file(&self) -> Option<String> {
        non_empty_var(LOG_FILE_VAR)
    }

    /// Run log level from `COMMANDER_LOG_LEVEL`.
    pub fn log_level(&self) -> Option<String> {
        non_empty_var(LOG_LEVEL_VAR).map(|level| level.to_uppercase())
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
