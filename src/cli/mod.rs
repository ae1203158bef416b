//! Command-line presentation: help text, diagnostics and clap export.
//!
//! # Features
//!
//! - **Help**: [`HelpRenderer`] prints usage lines, a parameter table and
//!   command overviews, optionally coloured
//! - **Diagnostics**: one-line `error:` messages on stderr
//! - **clap export** (feature `clap`): [`ClapBuilder`] turns a signature into a
//!   `clap::Command` for shell completions or man pages

pub mod help;
pub mod utils;

#[cfg(feature = "clap")]
pub mod builder;

pub use help::HelpRenderer;
pub use utils::truncate_with_ellipsis;

#[cfg(feature = "clap")]
pub use builder::ClapBuilder;
