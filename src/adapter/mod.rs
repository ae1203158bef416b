//! The signature-to-CLI adapter.
//!
//! An [`Adapter`] wraps one [`Command`]: it reads the command's signature
//! once, parses tokens into a [`ParsedInvocation`](crate::ParsedInvocation),
//! invokes the command and maps the result to an exit code.
//!
//! Targets come in two kinds: plain functions ([`FnCommand`]) and
//! constructors ([`Constructor`] over a [`FromInvocation`] type). Both return
//! an [`Outcome`].

#[allow(clippy::module_inception)]
mod adapter;
mod command;
mod outcome;

pub use adapter::{Adapter, AdapterOptions, FAILURE_EXIT_CODE, USAGE_EXIT_CODE};
pub use command::{Command, Constructor, FnCommand, FromInvocation};
pub use outcome::Outcome;

pub(crate) use adapter::wants_help;
