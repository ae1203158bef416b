//! Parameter descriptors: static metadata for one input of a callable.

use crate::error::{CommanderError, CommanderResult};
use crate::signature::{ArgValue, Value, ValueType};
use serde::{Deserialize, Serialize};

/// How a parameter may be supplied on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
	/// Bound by a positional token (in declaration order) or by its flag.
	#[default]
	PositionalOrKeyword,
	/// Bound only by its flag.
	KeywordOnly,
}

/// Descriptor for a single declared parameter.
///
/// A parameter is required exactly when it has no default.
///
/// # Example
///
/// ```
/// use commander::{Parameter, ValueType};
///
/// let name = Parameter::new("name", ValueType::Str);
/// assert!(name.is_required());
///
/// let times = Parameter::of::<i64>("times").with_default(1);
/// assert!(!times.is_required());
/// assert_eq!(times.long_flag(), "--times");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
	/// Name of the parameter, unique within its signature.
	pub name: String,

	/// Positional-or-keyword or keyword-only.
	#[serde(default)]
	pub kind: ParameterKind,

	/// Declared type, if any. Untyped parameters take their type from the
	/// default value, or are strings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value_type: Option<ValueType>,

	/// Default value. Its absence makes the parameter required.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<Value>,

	/// Optional single-character flag (`-n`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub short: Option<char>,

	/// Human-readable description, usually taken from the doc text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,

	/// Inclusive bounds for integer values, e.g. `(0, 65535)` for a port.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub range: Option<(i64, i64)>,
}

impl Parameter {
	/// Declare a parameter with an explicit type.
	pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
		Self {
			name: name.into(),
			kind: ParameterKind::PositionalOrKeyword,
			value_type: Some(value_type),
			default: None,
			short: None,
			description: None,
			range: None,
		}
	}

	/// Declare a parameter whose type comes from a Rust type.
	///
	/// Integer types narrower than `i64` carry their bounds, so `u32`
	/// rejects `-1` while parsing.
	pub fn of<T: ArgValue>(name: impl Into<String>) -> Self {
		Self {
			range: T::int_range(),
			..Self::new(name, T::value_type())
		}
	}

	/// Declare a parameter from a textual type tag such as `int` or `list[str]`.
	///
	/// An unsupported tag fails with a signature error naming this parameter.
	pub fn tagged(name: impl Into<String>, tag: &str) -> CommanderResult<Self> {
		let name = name.into();
		let value_type = ValueType::from_tag(tag).map_err(|e| attribute(e, &name))?;
		Ok(Self::new(name, value_type))
	}

	/// Declare a parameter without a type annotation.
	pub fn untyped(name: impl Into<String>) -> Self {
		Self {
			value_type: None,
			..Self::new(name, ValueType::Str)
		}
	}

	/// Declare a boolean flag that defaults to `false`.
	pub fn flag(name: impl Into<String>) -> Self {
		Self::new(name, ValueType::Bool).with_default(false)
	}

	/// Set a default value, making the parameter optional.
	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	/// Mark the parameter as keyword-only.
	pub fn keyword_only(mut self) -> Self {
		self.kind = ParameterKind::KeywordOnly;
		self
	}

	/// Set a short flag.
	pub fn with_short(mut self, short: char) -> Self {
		self.short = Some(short);
		self
	}

	/// Restrict integer values to `min..=max`.
	pub fn with_range(mut self, min: i64, max: i64) -> Self {
		self.range = Some((min, max));
		self
	}

	/// Check a coerced value against the declared bounds. The error string is
	/// the human-readable expected value.
	pub fn check_range(&self, value: &Value) -> Result<(), String> {
		let Some((min, max)) = self.range else {
			return Ok(());
		};
		let in_range = |v: &Value| v.as_int().map_or(true, |i| (min..=max).contains(&i));
		let ok = match value {
			Value::List(items) => items.iter().all(in_range),
			other => in_range(other),
		};
		if ok {
			Ok(())
		} else {
			Err(format!("int between {} and {}", min, max))
		}
	}

	/// Set the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// A parameter is required exactly when it has no default.
	pub fn is_required(&self) -> bool {
		self.default.is_none()
	}

	/// Whether the parameter may be bound by a positional token.
	///
	/// Booleans are flags and never bind positionally.
	pub fn accepts_positional(&self) -> bool {
		self.kind == ParameterKind::PositionalOrKeyword && !self.effective_type().is_bool()
	}

	/// The type used for coercion: the declared type, else the type of the
	/// default, else string.
	pub fn effective_type(&self) -> ValueType {
		self.value_type
			.clone()
			.or_else(|| self.default.as_ref().and_then(Value::inferred_type))
			.unwrap_or(ValueType::Str)
	}

	/// The canonical long flag, with underscores rendered as dashes.
	pub fn long_flag(&self) -> String {
		format!("--{}", self.flag_name())
	}

	/// The long flag name without the leading dashes.
	pub fn flag_name(&self) -> String {
		self.name.replace('_', "-")
	}

	/// Check the descriptor on its own: name syntax, type structure and the
	/// default against the type.
	pub(crate) fn validate(&self) -> CommanderResult<()> {
		if !is_valid_name(&self.name) {
			return Err(CommanderError::signature(
				&self.name,
				"parameter names must start with a letter or '_' and contain only letters, digits, '_' or '-'",
			));
		}
		if self.name.eq_ignore_ascii_case("help") {
			return Err(CommanderError::signature(&self.name, "'help' is reserved for usage output"));
		}
		if let Some(short) = self.short {
			if !short.is_ascii_alphanumeric() || short == 'h' {
				return Err(CommanderError::signature(
					&self.name,
					format!("short flag '-{}' is not available", short),
				));
			}
		}

		let ty = self.effective_type();
		ty.validate().map_err(|e| attribute(e, &self.name))?;

		if let Some((min, max)) = self.range {
			if *ty.scalar() != ValueType::Int {
				return Err(CommanderError::signature(&self.name, "a range needs an int type"));
			}
			if min > max {
				return Err(CommanderError::signature(
					&self.name,
					format!("range {}..={} is empty", min, max),
				));
			}
		}

		if let Some(default) = &self.default {
			if !ty.accepts(default) {
				return Err(CommanderError::signature(
					&self.name,
					format!("default value '{}' is not a valid {}", default, ty),
				));
			}
			if let Err(expected) = self.check_range(default) {
				return Err(CommanderError::signature(
					&self.name,
					format!("default value '{}' is not an {}", default, expected),
				));
			}
		}
		Ok(())
	}
}

fn is_valid_name(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Re-attribute a signature error raised by a type check to `name`.
fn attribute(error: CommanderError, name: &str) -> CommanderError {
	match error {
		CommanderError::Signature { message, .. } => CommanderError::signature(name, message),
		other => other,
	}
}
