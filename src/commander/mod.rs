//! Registering several commands under one program and dispatching `argv`.
//!
//! A [`Commander`] maps lowercased names to commands or [`CommandGroup`]s.
//! The first token after the program name selects the command; for groups
//! the second selects the subcommand. Remaining tokens go to the command's
//! [`Adapter`](crate::Adapter).

mod group;
mod store;

pub use group::CommandGroup;
pub use store::Commander;
