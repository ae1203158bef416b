//! The adapter: one target command bound to its derived signature.

use crate::adapter::{Command, Outcome};
use crate::cli::utils::{write_diagnostic, write_help_hint};
use crate::cli::HelpRenderer;
use crate::error::{CommanderError, CommanderResult};
use crate::parser::{ArgumentParser, ParsedInvocation, ParserOptions};
use crate::signature::Signature;
use std::io::{self, Write};
use tracing::{debug, info, warn};

#[cfg(feature = "observability")]
use crate::observability::RunLogger;

/// Default exit code for command-line mistakes.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Default exit code for failures raised by the command.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Behaviour switches for an [`Adapter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterOptions {
	/// Flag recognition options.
	pub parser: ParserOptions,
	/// Use ANSI colours in help and diagnostics.
	pub color: bool,
	/// Exit code for unknown, missing, duplicate or malformed arguments.
	pub usage_exit_code: i32,
	/// Exit code for every other failure.
	pub failure_exit_code: i32,
	/// Program name shown in usage lines; defaults to the command name.
	pub program_name: Option<String>,
}

impl Default for AdapterOptions {
	fn default() -> Self {
		Self {
			parser: ParserOptions::default(),
			color: true,
			usage_exit_code: USAGE_EXIT_CODE,
			failure_exit_code: FAILURE_EXIT_CODE,
			program_name: None,
		}
	}
}

/// Exposes one command as a command-line program.
///
/// The signature is read once in [`Adapter::build`]; parsing and invoking
/// are then repeatable and side-effect free apart from the command itself.
///
/// # Example
///
/// ```
/// use commander::{Adapter, AdapterOptions, FnCommand, Outcome, Parameter, Signature, ValueType};
///
/// let greet = FnCommand::new(
///     "greet",
///     Signature::builder()
///         .param(Parameter::new("name", ValueType::Str))
///         .param(Parameter::of::<i64>("times").with_default(1)),
///     |args| {
///         let name: String = args.get("name")?;
///         let times: i64 = args.get("times")?;
///         Ok(Outcome::text(vec![format!("Hello, {}!", name); times.max(0) as usize].join("\n")))
///     },
/// );
///
/// let adapter = Adapter::build(greet).unwrap();
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = adapter.run_with_io(["--name", "Ada", "--times", "2"], &mut out, &mut err);
///
/// assert_eq!(code, 0);
/// assert_eq!(String::from_utf8(out).unwrap(), "Hello, Ada!\nHello, Ada!\n");
/// ```
pub struct Adapter<C> {
	command: C,
	signature: Signature,
	options: AdapterOptions,
	#[cfg(feature = "observability")]
	run_logger: Option<RunLogger>,
}

impl<C: Command> Adapter<C> {
	/// Read the command's signature and build an adapter with default options.
	pub fn build(command: C) -> CommanderResult<Self> {
		Self::build_with(command, AdapterOptions::default())
	}

	/// Read the command's signature and build an adapter.
	pub fn build_with(command: C, options: AdapterOptions) -> CommanderResult<Self> {
		let signature = command.signature()?;
		debug!(
			command = command.name(),
			parameters = signature.len(),
			"built adapter"
		);
		Ok(Self {
			command,
			signature,
			options,
			#[cfg(feature = "observability")]
			run_logger: None,
		})
	}

	/// Record every run in a markdown log.
	#[cfg(feature = "observability")]
	pub fn with_run_logger(mut self, logger: RunLogger) -> Self {
		self.run_logger = Some(logger);
		self
	}

	/// Name of the wrapped command.
	pub fn name(&self) -> &str {
		self.command.name()
	}

	/// The derived signature.
	pub fn signature(&self) -> &Signature {
		&self.signature
	}

	/// The options in effect.
	pub fn options(&self) -> &AdapterOptions {
		&self.options
	}

	fn program(&self) -> &str {
		self.options
			.program_name
			.as_deref()
			.unwrap_or_else(|| self.command.name())
	}

	/// Bind tokens (without the program name) to the signature.
	pub fn parse<I, T>(&self, tokens: I) -> CommanderResult<ParsedInvocation>
	where
		I: IntoIterator<Item = T>,
		T: AsRef<str>,
	{
		ArgumentParser::new(&self.signature, self.options.parser.clone()).parse(tokens)
	}

	/// Call the command. Any failure it raises is wrapped in
	/// [`CommanderError::TargetInvocation`] with the original error as source.
	pub fn invoke(&self, invocation: &ParsedInvocation) -> CommanderResult<Outcome> {
		debug!(command = self.name(), "invoking command");
		self.command
			.call(invocation)
			.map_err(|source| CommanderError::target_invocation(self.name(), source))
	}

	/// Parse and invoke.
	pub fn execute<I, T>(&self, tokens: I) -> CommanderResult<Outcome>
	where
		I: IntoIterator<Item = T>,
		T: AsRef<str>,
	{
		let invocation = self.parse(tokens)?;
		self.invoke(&invocation)
	}

	/// Help text for this command.
	pub fn help(&self) -> String {
		HelpRenderer::new(self.options.color).render(self.program(), &self.signature)
	}

	/// Run against the process streams and return the exit code.
	pub fn run<I, T>(&self, tokens: I) -> i32
	where
		I: IntoIterator<Item = T>,
		T: AsRef<str>,
	{
		let stdout = io::stdout();
		let stderr = io::stderr();
		self.run_with_io(tokens, &mut stdout.lock(), &mut stderr.lock())
	}

	/// Run with explicit output streams and return the exit code.
	///
	/// `--help` or `-h` before `--` prints help to `out` and returns 0.
	/// Errors print a one-line diagnostic to `err`.
	pub fn run_with_io<I, T>(&self, tokens: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
	where
		I: IntoIterator<Item = T>,
		T: AsRef<str>,
	{
		let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();

		if wants_help(&tokens) {
			return match out.write_all(self.help().as_bytes()) {
				Ok(()) => 0,
				Err(e) => self.report(&CommanderError::from(e), err),
			};
		}

		#[cfg(feature = "observability")]
		self.record(|logger| logger.log_run_start(self.name(), &tokens));

		let result = self.parse(&tokens).and_then(|invocation| {
			#[cfg(feature = "observability")]
			self.record(|logger| logger.log_parsed(&invocation));
			let outcome = self.invoke(&invocation)?;
			write_outcome(&outcome, out)?;
			Ok(outcome.exit_code())
		});

		let code = match result {
			Ok(code) => {
				info!(command = self.name(), exit_code = code, "command finished");
				code
			}
			Err(error) => self.report(&error, err),
		};

		#[cfg(feature = "observability")]
		self.record(|logger| logger.log_completion(code));

		code
	}

	fn report(&self, error: &CommanderError, err: &mut dyn Write) -> i32 {
		let code = error.exit_code(self.options.usage_exit_code, self.options.failure_exit_code);
		warn!(command = self.name(), exit_code = code, "{}", error);

		#[cfg(feature = "observability")]
		self.record(|logger| {
			let kind = if error.is_usage_error() { "usage" } else { "failure" };
			logger.log_error(kind, &error.to_string())
		});

		let written = write_diagnostic(err, self.program(), &error.to_string(), self.options.color)
			.and_then(|()| {
				if error.is_usage_error() {
					write_help_hint(err, self.program(), self.options.color)
				} else {
					Ok(())
				}
			});
		if let Err(e) = written {
			warn!(error = %e, "failed to write diagnostic");
		}
		code
	}

	#[cfg(feature = "observability")]
	fn record<F>(&self, entry: F)
	where
		F: FnOnce(&RunLogger) -> anyhow::Result<()>,
	{
		if let Some(logger) = &self.run_logger {
			if let Err(e) = entry(logger) {
				warn!(error = %e, "failed to write run log");
			}
		}
	}
}

/// Whether `--help` or `-h` appears before the `--` separator.
pub(crate) fn wants_help(tokens: &[String]) -> bool {
	tokens
		.iter()
		.take_while(|t| t.as_str() != "--")
		.any(|t| t == "--help" || t == "-h")
}

fn write_outcome(outcome: &Outcome, out: &mut dyn Write) -> CommanderResult<()> {
	match outcome {
		Outcome::Unit | Outcome::ExitCode(_) => {}
		Outcome::Text(text) => {
			if text.ends_with('\n') {
				write!(out, "{}", text)?;
			} else {
				writeln!(out, "{}", text)?;
			}
		}
		Outcome::Json(value) => {
			let rendered = serde_json::to_string_pretty(value)
				.map_err(|e| CommanderError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
			writeln!(out, "{}", rendered)?;
		}
	}
	out.flush()?;
	Ok(())
}
