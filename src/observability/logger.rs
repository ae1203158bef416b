//! Markdown run log for command invocations.

use crate::parser::ParsedInvocation;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Logger that records each command run in a markdown file.
///
/// One run produces a start entry, the parsed arguments, an optional error
/// entry and a completion entry with the exit code.
#[derive(Debug)]
pub struct RunLogger {
    log_file: PathBuf,
    log_level: String,
}

impl RunLogger {
    /// Initialize logger.
    ///
    /// # Arguments
    /// * `log_file` - Path to log file. If None, creates a timestamped file in temp directory.
    /// * `log_level` - Logging level (defaults to "INFO"). At "DEBUG" the bound values are logged in full.
    pub fn new(log_file: Option<&Path>, log_level: Option<&str>) -> Result<Self> {
        let log_file = match log_file {
            Some(p) => p.to_path_buf(),
            None => {
                let dir = std::env::temp_dir().join("commander-logs");
                std::fs::create_dir_all(&dir).with_context(|| {
                    format!("Failed to create log directory: {}", dir.display())
                })?;
                dir.join(format!(
                    "run_{}_{}.md",
                    Utc::now().timestamp_millis(),
                    std::process::id()
                ))
            }
        };

        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let logger = Self {
            log_file,
            log_level: log_level.unwrap_or("INFO").to_uppercase(),
        };

        if !logger.log_file.exists() {
            logger.initialize_log_file()?;
        }

        Ok(logger)
    }

    fn initialize_log_file(&self) -> Result<()> {
        let mut file = File::create(&self.log_file)
            .with_context(|| format!("Failed to create log file: {}", self.log_file.display()))?;

        writeln!(file, "# Command Run Log\n")?;
        writeln!(file, "Log started: {}\n", Utc::now().to_rfc3339())?;
        writeln!(file, "---\n")?;

        Ok(())
    }

    fn append_to_log(&self, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log file: {}", self.log_file.display()))?;

        write!(file, "{}", content).with_context(|| "Failed to write to log file")?;

        Ok(())
    }

    /// Log the start of a run.
    ///
    /// # Arguments
    /// * `command` - Name of the command being run.
    /// * `tokens` - Command-line tokens, without the program name.
    pub fn log_run_start(&self, command: &str, tokens: &[String]) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "## Run Started - {}\n\n**Command:** {}\n**Tokens:** `{}`\n\n",
            now.to_rfc3339(),
            command,
            tokens.join(" ")
        );

        self.append_to_log(&content)?;
        debug!(command, "run log: run started");
        Ok(())
    }

    /// Log the arguments bound by the parser.
    pub fn log_parsed(&self, invocation: &ParsedInvocation) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = if self.is_debug() {
            format!(
                "### Parsed Arguments - {}\n\n```json\n{}\n```\n\n",
                now.to_rfc3339(),
                serde_json::to_string_pretty(&invocation.to_json()).unwrap_or_default()
            )
        } else {
            let names: Vec<&str> = invocation.iter().map(|(name, _)| name).collect();
            format!(
                "### Parsed Arguments - {}\n\n**Bound:** {}\n\n",
                now.to_rfc3339(),
                names.join(", ")
            )
        };

        self.append_to_log(&content)
    }

    /// Log an error with its kind.
    ///
    /// # Arguments
    /// * `kind` - Short classification, e.g. "usage" or "target".
    /// * `error` - Error message.
    pub fn log_error(&self, kind: &str, error: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "### Error - {}\n\n**Kind:** {}\n**Error:** {}\n\n",
            now.to_rfc3339(),
            kind,
            error
        );

        self.append_to_log(&content)
    }

    /// Log the end of a run.
    pub fn log_completion(&self, exit_code: i32) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "### Run Completed - {}\n\n**Exit Code:** {}\n\n---\n\n",
            now.to_rfc3339(),
            exit_code
        );

        self.append_to_log(&content)?;
        info!(exit_code, log_file = %self.log_file.display(), "run logged");
        Ok(())
    }

    fn is_debug(&self) -> bool {
        self.log_level == "DEBUG" || self.log_level == "TRACE"
    }

    /// Get the log file path.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Get the log level.
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}
