//! Command trait and the target kinds an adapter can wrap.

use crate::adapter::Outcome;
use crate::error::CommanderResult;
use crate::parser::ParsedInvocation;
use crate::signature::{Signature, SignatureBuilder};
use std::marker::PhantomData;

/// A named callable with a declared signature.
///
/// # Object Safety
///
/// This trait is object-safe and can be used with `dyn Command`.
///
/// # Example
///
/// ```
/// use commander::{Command, FnCommand, Outcome, Parameter, Signature, ValueType};
///
/// let greet = FnCommand::new(
///     "greet",
///     Signature::builder().param(Parameter::new("name", ValueType::Str)),
///     |args| Ok(Outcome::text(format!("Hello, {}!", args.get::<String>("name")?))),
/// );
///
/// assert_eq!(greet.name(), "greet");
/// assert!(greet.signature().unwrap().has_parameter("name"));
/// ```
pub trait Command {
	/// Name the command is registered under.
	fn name(&self) -> &str;

	/// Read the declared signature.
	///
	/// Fails with a signature error when a parameter is unsupported or
	/// ambiguous.
	fn signature(&self) -> CommanderResult<Signature>;

	/// Call the target with bound arguments.
	fn call(&self, invocation: &ParsedInvocation) -> anyhow::Result<Outcome>;

	/// One-line summary used in command overviews.
	fn summary(&self) -> Option<String> {
		self.signature()
			.ok()?
			.description()?
			.short_description
			.clone()
	}
}

impl<C: Command + ?Sized> Command for &C {
	fn name(&self) -> &str {
		(**self).name()
	}

	fn signature(&self) -> CommanderResult<Signature> {
		(**self).signature()
	}

	fn call(&self, invocation: &ParsedInvocation) -> anyhow::Result<Outcome> {
		(**self).call(invocation)
	}

	fn summary(&self) -> Option<String> {
		(**self).summary()
	}
}

impl<C: Command + ?Sized> Command for Box<C> {
	fn name(&self) -> &str {
		(**self).name()
	}

	fn signature(&self) -> CommanderResult<Signature> {
		(**self).signature()
	}

	fn call(&self, invocation: &ParsedInvocation) -> anyhow::Result<Outcome> {
		(**self).call(invocation)
	}

	fn summary(&self) -> Option<String> {
		(**self).summary()
	}
}

/// A plain function target: a signature plus a closure over the bound
/// arguments.
pub struct FnCommand<F> {
	name: String,
	signature: SignatureBuilder,
	handler: F,
}

impl<F> FnCommand<F>
where
	F: Fn(&ParsedInvocation) -> anyhow::Result<Outcome>,
{
	/// Create a function command.
	pub fn new(name: impl Into<String>, signature: SignatureBuilder, handler: F) -> Self {
		Self {
			name: name.into(),
			signature,
			handler,
		}
	}
}

impl<F> Command for FnCommand<F>
where
	F: Fn(&ParsedInvocation) -> anyhow::Result<Outcome>,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn signature(&self) -> CommanderResult<Signature> {
		self.signature.build()
	}

	fn call(&self, invocation: &ParsedInvocation) -> anyhow::Result<Outcome> {
		(self.handler)(invocation)
	}
}

/// A type that can be constructed from command-line arguments.
///
/// # Example
///
/// ```
/// use commander::{FromInvocation, ParsedInvocation, Parameter, Signature, SignatureBuilder};
///
/// struct Server {
///     host: String,
///     port: u32,
/// }
///
/// impl FromInvocation for Server {
///     fn signature() -> SignatureBuilder {
///         Signature::builder()
///             .param(Parameter::of::<String>("host").with_default("localhost"))
///             .param(Parameter::of::<u32>("port").with_default(8080))
///     }
///
///     fn from_invocation(args: &ParsedInvocation) -> anyhow::Result<Self> {
///         Ok(Self {
///             host: args.get("host")?,
///             port: args.get("port")?,
///         })
///     }
/// }
/// ```
pub trait FromInvocation: Sized {
	/// Declared constructor parameters.
	fn signature() -> SignatureBuilder;

	/// Construct the value from bound arguments.
	fn from_invocation(invocation: &ParsedInvocation) -> anyhow::Result<Self>;
}

/// A constructor target: builds a `T` from the arguments and hands it to a
/// handler.
pub struct Constructor<T, H> {
	name: String,
	handler: H,
	marker: PhantomData<fn() -> T>,
}

impl<T, H> Constructor<T, H>
where
	T: FromInvocation,
	H: Fn(T) -> anyhow::Result<Outcome>,
{
	/// Create a constructor command.
	pub fn new(name: impl Into<String>, handler: H) -> Self {
		Self {
			name: name.into(),
			handler,
			marker: PhantomData,
		}
	}
}

impl<T, H> Command for Constructor<T, H>
where
	T: FromInvocation,
	H: Fn(T) -> anyhow::Result<Outcome>,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn signature(&self) -> CommanderResult<Signature> {
		T::signature().build()
	}

	fn call(&self, invocation: &ParsedInvocation) -> anyhow::Result<Outcome> {
		let value = T::from_invocation(invocation)?;
		(self.handler)(value)
	}
}
