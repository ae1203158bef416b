//! Error types shared by every stage of the adapter pipeline.

use thiserror::Error;

/// Result type for commander operations.
pub type CommanderResult<T> = Result<T, CommanderError>;

/// Errors raised while building, parsing, dispatching or configuring a command.
///
/// Build-time problems surface as [`CommanderError::Signature`]. The four
/// parse-time kinds are recoverable by the caller correcting its input.
/// Failures raised by the wrapped callable itself are carried verbatim inside
/// [`CommanderError::TargetInvocation`].
///
/// # Example
///
/// ```
/// use commander::CommanderError;
///
/// let error = CommanderError::missing_argument("name", "required argument was not supplied");
/// assert!(error.to_string().contains("--name"));
/// assert!(error.is_usage_error());
/// ```
#[derive(Debug, Error)]
pub enum CommanderError {
    /// A declared parameter is unsupported or ambiguous.
    #[error("invalid signature for parameter '{parameter}': {message}")]
    Signature {
        /// Name of the offending parameter, or `*` for signature-wide problems.
        parameter: String,
        /// Description of the problem.
        message: String,
    },

    /// A flag or positional token does not correspond to any parameter.
    #[error("unknown argument '{token}'")]
    UnknownArgument {
        /// The token as it appeared on the command line.
        token: String,
    },

    /// A required parameter did not receive a value.
    #[error("missing argument '--{name}': {message}")]
    MissingArgument {
        /// Name of the parameter.
        name: String,
        /// Description of what was missing.
        message: String,
    },

    /// The same parameter was bound more than once.
    #[error("argument '--{name}' was supplied more than once")]
    DuplicateArgument {
        /// Name of the parameter.
        name: String,
    },

    /// A raw token could not be converted to the parameter's declared type.
    #[error("invalid value '{value}' for '--{name}': expected {expected}")]
    TypeCoercion {
        /// Name of the parameter.
        name: String,
        /// The raw token that failed to convert.
        value: String,
        /// Human-readable form of the declared type.
        expected: String,
    },

    /// The wrapped callable failed.
    #[error("command '{command}' failed: {source}")]
    TargetInvocation {
        /// Name of the command that failed.
        command: String,
        /// The error raised by the callable.
        #[source]
        source: anyhow::Error,
    },

    /// No registered command matches the requested name.
    #[error("unknown command '{name}'")]
    UnknownCommand {
        /// The requested command name.
        name: String,
    },

    /// A command or group with the same name is already registered.
    #[error("command '{name}' is already registered")]
    DuplicateCommand {
        /// The lowercased command name.
        name: String,
    },

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O failure while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommanderError {
    /// Create a Signature error.
    pub fn signature(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Signature {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an UnknownArgument error.
    pub fn unknown_argument(token: impl Into<String>) -> Self {
        Self::UnknownArgument {
            token: token.into(),
        }
    }

    /// Create a MissingArgument error.
    pub fn missing_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a DuplicateArgument error.
    pub fn duplicate_argument(name: impl Into<String>) -> Self {
        Self::DuplicateArgument { name: name.into() }
    }

    /// Create a TypeCoercion error.
    pub fn type_coercion(
        name: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::TypeCoercion {
            name: name.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Wrap a failure raised by the callable behind `command`.
    pub fn target_invocation(command: impl Into<String>, source: anyhow::Error) -> Self {
        Self::TargetInvocation {
            command: command.into(),
            source,
        }
    }

    /// Create an UnknownCommand error.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Create a DuplicateCommand error.
    pub fn duplicate_command(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }

    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error was caused by the command-line input rather than by
    /// the program or the callable.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownArgument { .. }
                | Self::MissingArgument { .. }
                | Self::DuplicateArgument { .. }
                | Self::TypeCoercion { .. }
                | Self::UnknownCommand { .. }
        )
    }

    /// Exit code for this error, given the codes for usage errors and for
    /// every other failure.
    pub fn exit_code(&self, usage_exit_code: i32, failure_exit_code: i32) -> i32 {
        if self.is_usage_error() {
            usage_exit_code
        } else {
            failure_exit_code
        }
    }
}
