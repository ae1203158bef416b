//! Run logging for command invocations.
//!
//! The [`RunLogger`] appends a markdown record of every run to a file: the
//! tokens, the bound arguments, any error and the exit code. It is enabled by
//! setting `logging.log_file` in the configuration or `COMMANDER_LOG_FILE` in
//! the environment.
//!
//! # Example
//!
//! ```no_run
//! use commander::observability::RunLogger;
//! use std::path::Path;
//!
//! let logger = RunLogger::new(Some(Path::new("runs.md")), Some("DEBUG")).unwrap();
//! logger.log_run_start("greet", &["--name".to_string(), "Ada".to_string()]).unwrap();
//! logger.log_completion(0).unwrap();
//! ```

pub mod logger;

pub use logger::RunLogger;
