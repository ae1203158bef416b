//! Declared parameter types and coercion of raw tokens into values.

use crate::error::{CommanderError, CommanderResult};
use crate::signature::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic type declared for a parameter.
///
/// Lists hold scalars only; a nested list is rejected when the signature is
/// built.
///
/// # Example
///
/// ```
/// use commander::ValueType;
///
/// let ty = ValueType::from_tag("list[int]").unwrap();
/// assert_eq!(ty.to_string(), "list[int]");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	/// Any string.
	Str,
	/// Signed 64-bit integer.
	Int,
	/// 64-bit float.
	Float,
	/// Boolean, rendered as a flag on the command line.
	Bool,
	/// One of a fixed set of strings.
	Enum(Vec<String>),
	/// Zero or more values of a scalar type.
	List(Box<ValueType>),
}

impl ValueType {
	/// Parse a type tag such as `int`, `list[str]` or `enum[fast|slow]`.
	///
	/// Tags are case-insensitive. Unsupported or ambiguous tags produce a
	/// [`CommanderError::Signature`] naming `*`; the signature reader
	/// re-attributes it to the parameter being declared.
	pub fn from_tag(tag: &str) -> CommanderResult<Self> {
		let trimmed = tag.trim();
		let lower = trimmed.to_ascii_lowercase();

		match lower.as_str() {
			"str" | "string" => return Ok(Self::Str),
			"int" | "integer" => return Ok(Self::Int),
			"float" => return Ok(Self::Float),
			"bool" | "boolean" => return Ok(Self::Bool),
			_ => {}
		}

		if let Some(inner) = bracketed(trimmed, "list") {
			let element = Self::from_tag(inner)?;
			let ty = Self::List(Box::new(element));
			ty.validate()?;
			return Ok(ty);
		}

		if let Some(inner) = bracketed(trimmed, "enum") {
			let choices = inner
				.split('|')
				.map(|c| c.trim().to_string())
				.filter(|c| !c.is_empty())
				.collect();
			let ty = Self::Enum(choices);
			ty.validate()?;
			return Ok(ty);
		}

		Err(CommanderError::signature(
			"*",
			format!("unsupported type tag '{}'", trimmed),
		))
	}

	/// Check the structural rules: enums need at least one distinct choice
	/// and list elements must be scalars.
	pub fn validate(&self) -> CommanderResult<()> {
		match self {
			Self::Enum(choices) => {
				if choices.is_empty() {
					return Err(CommanderError::signature("*", "enum type declares no choices"));
				}
				for (i, choice) in choices.iter().enumerate() {
					if choices[..i].contains(choice) {
						return Err(CommanderError::signature(
							"*",
							format!("enum choice '{}' is declared twice", choice),
						));
					}
				}
				Ok(())
			}
			Self::List(element) => match element.as_ref() {
				Self::List(_) => Err(CommanderError::signature(
					"*",
					"nested list types cannot be expressed on the command line",
				)),
				other => other.validate(),
			},
			_ => Ok(()),
		}
	}

	/// Whether this is a list type.
	pub fn is_list(&self) -> bool {
		matches!(self, Self::List(_))
	}

	/// Whether this is the boolean type.
	pub fn is_bool(&self) -> bool {
		matches!(self, Self::Bool)
	}

	/// The type of a single command-line token: the element type for lists,
	/// the type itself otherwise.
	pub fn scalar(&self) -> &ValueType {
		match self {
			Self::List(element) => element,
			other => other,
		}
	}

	/// Convert one raw token into a scalar value of this type.
	///
	/// For list types the token is converted to the element type. The error
	/// string is the human-readable expected type.
	pub fn coerce(&self, raw: &str) -> Result<Value, String> {
		match self.scalar() {
			Self::Str => Ok(Value::Str(raw.to_string())),
			Self::Int => raw
				.trim()
				.parse::<i64>()
				.map(Value::Int)
				.map_err(|_| "int".to_string()),
			Self::Float => raw
				.trim()
				.parse::<f64>()
				.map(Value::Float)
				.map_err(|_| "float".to_string()),
			Self::Bool => parse_bool(raw)
				.map(Value::Bool)
				.ok_or_else(|| "bool (true/false, yes/no, 1/0, on/off)".to_string()),
			Self::Enum(choices) => {
				if choices.iter().any(|c| c == raw) {
					Ok(Value::Str(raw.to_string()))
				} else {
					Err(format!("one of {}", choices.join(", ")))
				}
			}
			Self::List(_) => Err(self.to_string()),
		}
	}

	/// Whether `value` is a valid instance of this type.
	pub fn accepts(&self, value: &Value) -> bool {
		match (self, value) {
			(Self::Str, Value::Str(_)) => true,
			(Self::Int, Value::Int(_)) => true,
			(Self::Float, Value::Float(_)) | (Self::Float, Value::Int(_)) => true,
			(Self::Bool, Value::Bool(_)) => true,
			(Self::Enum(choices), Value::Str(s)) => choices.contains(s),
			(Self::List(element), Value::List(items)) => items.iter().all(|v| element.accepts(v)),
			_ => false,
		}
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Str => write!(f, "str"),
			Self::Int => write!(f, "int"),
			Self::Float => write!(f, "float"),
			Self::Bool => write!(f, "bool"),
			Self::Enum(choices) => write!(f, "enum[{}]", choices.join("|")),
			Self::List(element) => write!(f, "list[{}]", element),
		}
	}
}

/// Parse the accepted spellings of a boolean.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "yes" | "y" | "1" | "on" => Some(true),
		"false" | "no" | "n" | "0" | "off" => Some(false),
		_ => None,
	}
}

fn bracketed<'a>(tag: &'a str, head: &str) -> Option<&'a str> {
	let open = tag.find('[')?;
	if !tag[..open].trim().eq_ignore_ascii_case(head) || !tag.ends_with(']') {
		return None;
	}
	Some(&tag[open + 1..tag.len() - 1])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_scalar_tags() {
		assert_eq!(ValueType::from_tag("str").unwrap(), ValueType::Str);
		assert_eq!(ValueType::from_tag("String").unwrap(), ValueType::Str);
		assert_eq!(ValueType::from_tag("INT").unwrap(), ValueType::Int);
		assert_eq!(ValueType::from_tag("float").unwrap(), ValueType::Float);
		assert_eq!(ValueType::from_tag("boolean").unwrap(), ValueType::Bool);
	}

	#[test]
	fn test_compound_tags() {
		assert_eq!(
			ValueType::from_tag("List[int]").unwrap(),
			ValueType::List(Box::new(ValueType::Int))
		);
		assert_eq!(
			ValueType::from_tag("enum[fast | slow]").unwrap(),
			ValueType::Enum(vec!["fast".to_string(), "slow".to_string()])
		);
	}

	#[test]
	fn test_unsupported_tags() {
		for tag in ["dict", "any", "", "list[list[int]]", "enum[]", "enum[a|a]", "list[dict]"] {
			let result = ValueType::from_tag(tag);
			assert!(
				matches!(result, Err(CommanderError::Signature { .. })),
				"tag {:?} should be rejected",
				tag
			);
		}
	}

	#[test]
	fn test_coerce_int() {
		assert_eq!(ValueType::Int.coerce("42"), Ok(Value::Int(42)));
		assert_eq!(ValueType::Int.coerce("-3"), Ok(Value::Int(-3)));
		assert_eq!(ValueType::Int.coerce("x"), Err("int".to_string()));
		assert!(ValueType::Int.coerce("1.5").is_err());
	}

	#[test]
	fn test_coerce_bool_and_enum() {
		assert_eq!(ValueType::Bool.coerce("Yes"), Ok(Value::Bool(true)));
		assert_eq!(ValueType::Bool.coerce("off"), Ok(Value::Bool(false)));
		assert!(ValueType::Bool.coerce("maybe").is_err());

		let mode = ValueType::Enum(vec!["fast".into(), "slow".into()]);
		assert_eq!(mode.coerce("fast"), Ok(Value::Str("fast".into())));
		assert_eq!(mode.coerce("medium"), Err("one of fast, slow".to_string()));
	}

	#[test]
	fn test_coerce_list_element() {
		let ty = ValueType::List(Box::new(ValueType::Float));
		assert_eq!(ty.coerce("2.5"), Ok(Value::Float(2.5)));
	}

	#[test]
	fn test_accepts() {
		assert!(ValueType::Float.accepts(&Value::Int(1)));
		assert!(!ValueType::Int.accepts(&Value::Float(1.0)));
		assert!(ValueType::List(Box::new(ValueType::Int)).accepts(&Value::from(vec![1, 2])));
		assert!(!ValueType::Enum(vec!["a".into()]).accepts(&Value::from("b")));
	}

	#[test]
	fn test_display_roundtrip() {
		for tag in ["str", "int", "float", "bool", "list[str]", "enum[a|b]"] {
			let ty = ValueType::from_tag(tag).unwrap();
			assert_eq!(ValueType::from_tag(&ty.to_string()).unwrap(), ty);
		}
	}
}
