//! Configuration for command-line programs built on commander.
//!
//! This module provides configuration loading through TOML files and
//! environment overrides via `.env` files and process variables.
//!
//! # Example
//!
//! ```no_run
//! use commander::config::{ConfigurationLoader, EnvironmentLoader};
//! use commander::Commander;
//!
//! let env = EnvironmentLoader::new(None);
//! let loader = ConfigurationLoader::for_app("greeter", None)
//!     .unwrap()
//!     .with_environment(&env)
//!     .unwrap();
//!
//! let app = Commander::from_config(&loader.config);
//! println!("Usage exit code: {}", loader.config.output.usage_exit_code);
//! ```

pub mod config;
pub mod environment;

pub use self::config::{
    AppConfig, CommanderConfig, ConfigurationLoader, LoggingConfig, OutputConfig, ParsingConfig,
};
pub use self::environment::{EnvironmentLoader, LOG_FILE_VAR, LOG_LEVEL_VAR};
