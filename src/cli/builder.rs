//! Export of signatures as clap commands, for completions and man pages.

use crate::signature::{Parameter, Signature, ValueType};
use clap::{Arg, ArgAction, Command};

fn leak(text: &str) -> &'static str {
    Box::leak(text.to_string().into_boxed_str())
}

/// Builds a clap Command mirroring a signature.
///
/// Positional-or-keyword parameters become positional arguments and
/// keyword-only parameters become long options. Booleans become switches.
/// Exported commands are for tooling; parsing stays with
/// [`ArgumentParser`](crate::ArgumentParser).
///
/// # Example
///
/// ```
/// use commander::cli::ClapBuilder;
/// use commander::{Parameter, Signature, ValueType};
///
/// let signature = Signature::builder()
///     .param(Parameter::new("name", ValueType::Str))
///     .build()
///     .unwrap();
///
/// let command = ClapBuilder::new("greet", &signature).build();
/// assert_eq!(command.get_name(), "greet");
/// ```
pub struct ClapBuilder<'a> {
    name: String,
    signature: &'a Signature,
    version: Option<String>,
}

impl<'a> ClapBuilder<'a> {
    /// Create a new builder for the command `name`.
    pub fn new(name: impl Into<String>, signature: &'a Signature) -> Self {
        Self {
            name: name.into(),
            signature,
            version: None,
        }
    }

    /// Set the version reported by `--version`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Build the clap Command.
    pub fn build(self) -> Command {
        let mut cmd = Command::new(leak(&self.name));

        if let Some(version) = &self.version {
            cmd = cmd.version(leak(version));
        }

        if let Some(description) = self.signature.description() {
            if let Some(short) = &description.short_description {
                cmd = cmd.about(leak(short));
            }
            if let Some(long) = &description.long_description {
                cmd = cmd.long_about(leak(long));
            }
        }

        // clap needs required positionals before optional ones and a
        // variadic positional last, so anything after either is exported as
        // an option.
        let mut optional_seen = false;
        for parameter in self.signature.parameters() {
            let positional = parameter.accepts_positional() && !optional_seen;
            if positional && (!parameter.is_required() || parameter.effective_type().is_list()) {
                optional_seen = true;
            }
            cmd = cmd.arg(Self::build_arg(parameter, positional));
        }

        cmd
    }

    /// Build a single argument.
    fn build_arg(parameter: &Parameter, positional: bool) -> Arg {
        let ty = parameter.effective_type();
        let mut arg = Arg::new(leak(&parameter.name));

        if !positional {
            arg = arg.long(leak(&parameter.flag_name()));
            if let Some(short) = parameter.short {
                arg = arg.short(short);
            }
        }

        if let Some(description) = &parameter.description {
            arg = arg.help(leak(description));
        }

        arg = if ty.is_bool() {
            arg.action(ArgAction::SetTrue)
        } else if ty.is_list() {
            let arg = arg.action(ArgAction::Append);
            if positional {
                arg.num_args(1..)
            } else {
                arg
            }
        } else {
            arg.action(ArgAction::Set)
        };

        if parameter.is_required() && !ty.is_bool() {
            arg = arg.required(true);
        }

        if let Some(default) = &parameter.default {
            if !ty.is_list() && !ty.is_bool() {
                arg = arg.default_value(leak(&default.to_string()));
            }
        }

        if let ValueType::Enum(choices) = ty.scalar() {
            let static_values: Vec<&'static str> = choices.iter().map(|c| leak(c)).collect();
            arg = arg.value_parser(static_values);
        }

        if let Some((min, max)) = parameter.range {
            arg = arg.value_parser(clap::value_parser!(i64).range(min..=max));
        }

        arg
    }
}
