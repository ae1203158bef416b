//! commander - expose Rust functions as command-line programs
//!
//! A command declares its parameters once; commander derives the flags,
//! parses `argv`, coerces values to the declared types, calls the command
//! and maps the outcome to an exit code.
//!
//! - **`signature`** - Parameter declarations, type tags and doc parsing
//! - **`parser`** - Token parsing into a bound invocation
//! - **`adapter`** - One command exposed as a program
//! - **`commander`** - Several commands and groups under one program
//! - **`cli`** - Help text, diagnostics and clap export
//! - **`config`** - TOML and environment configuration
//! - **`observability`** - Markdown run logs
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! commander = { version = "0.1", default-features = false }
//! # Or pick what you need:
//! commander = { version = "0.1", features = ["config", "observability"] }
//! # Or enable everything:
//! commander = { version = "0.1", features = ["all"] }
//! ```
//!
//! # Example
//!
//! ```
//! use commander::prelude::*;
//!
//! let greet = FnCommand::new(
//!     "greet",
//!     Signature::builder()
//!         .param(Parameter::new("name", ValueType::Str))
//!         .param(Parameter::of::<i64>("times").with_default(1))
//!         .doc(
//!             "Greet someone.
//!
//!             Args:
//!                 name: Who to greet.
//!                 times: How many times.
//!             ",
//!         ),
//!     |args| {
//!         let name: String = args.get("name")?;
//!         let times: i64 = args.get("times")?;
//!         for _ in 0..times {
//!             println!("Hello, {}!", name);
//!         }
//!         Ok(Outcome::Unit)
//!     },
//! );
//!
//! let adapter = Adapter::build(greet).unwrap();
//! let invocation = adapter.parse(["--name", "Ada"]).unwrap();
//! assert_eq!(invocation.get::<i64>("times").unwrap(), 1);
//!
//! assert!(matches!(
//!     adapter.parse(["--name", "Ada", "--times", "x"]),
//!     Err(CommanderError::TypeCoercion { .. })
//! ));
//! assert!(matches!(
//!     adapter.parse(["--times", "2"]),
//!     Err(CommanderError::MissingArgument { .. })
//! ));
//! ```

#![warn(missing_docs)]

mod error;

/// Parameter declarations and signatures
pub mod signature;

/// Token parsing
pub mod parser;

/// The signature-to-CLI adapter
pub mod adapter;

/// Command store and dispatcher
pub mod commander;

/// Help rendering, diagnostics and clap export
pub mod cli;

/// Configuration management (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// Run logging (enabled with the `observability` feature)
#[cfg(feature = "observability")]
pub mod observability;

pub use adapter::{
    Adapter, AdapterOptions, Command, Constructor, FnCommand, FromInvocation, Outcome,
    FAILURE_EXIT_CODE, USAGE_EXIT_CODE,
};
pub use commander::{CommandGroup, Commander};
pub use error::{CommanderError, CommanderResult};
pub use parser::{ArgumentParser, ParsedInvocation, ParserOptions};
pub use signature::{
    ArgValue, Description, Parameter, ParameterDescription, ParameterKind, Signature,
    SignatureBuilder, Value, ValueType,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapter::{Adapter, AdapterOptions, Command, Constructor, FnCommand, FromInvocation, Outcome};
    pub use crate::commander::{CommandGroup, Commander};
    pub use crate::error::{CommanderError, CommanderResult};
    pub use crate::parser::ParsedInvocation;
    pub use crate::signature::{Parameter, ParameterKind, Signature, Value, ValueType};

    #[cfg(feature = "config")]
    pub use crate::config::{CommanderConfig, ConfigurationLoader, EnvironmentLoader};

    #[cfg(feature = "observability")]
    pub use crate::observability::RunLogger;
}
