//! Concrete argument values and the conversion trait between them and Rust types.

use crate::signature::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A concrete value bound to a parameter.
///
/// # Example
///
/// ```
/// use commander::Value;
///
/// let value = Value::from(3);
/// assert_eq!(value.as_int(), Some(3));
/// assert_eq!(value.to_string(), "3");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Boolean flag value.
	Bool(bool),
	/// Signed 64-bit integer.
	Int(i64),
	/// 64-bit float.
	Float(f64),
	/// UTF-8 string, also used for enum choices.
	Str(String),
	/// Homogeneous list of scalar values.
	List(Vec<Value>),
}

impl Value {
	/// Borrow the string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Integer payload.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Float payload. Integers widen.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(f) => Some(*f),
			Self::Int(i) => Some(*i as f64),
			_ => None,
		}
	}

	/// Bool payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// List payload.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Short name of the variant, used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Str(_) => "str",
			Self::List(_) => "list",
		}
	}

	/// The type tag a value of this shape would carry when no type is declared.
	///
	/// Returns `None` for an empty list, whose element type cannot be known.
	pub fn inferred_type(&self) -> Option<ValueType> {
		match self {
			Self::Bool(_) => Some(ValueType::Bool),
			Self::Int(_) => Some(ValueType::Int),
			Self::Float(_) => Some(ValueType::Float),
			Self::Str(_) => Some(ValueType::Str),
			Self::List(items) => {
				let first = items.first()?.inferred_type()?;
				Some(ValueType::List(Box::new(first)))
			}
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(b) => write!(f, "{}", b),
			Self::Int(i) => write!(f, "{}", i),
			Self::Float(x) => write!(f, "{}", x),
			Self::Str(s) => write!(f, "{}", s),
			Self::List(items) => {
				let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
				write!(f, "[{}]", parts.join(", "))
			}
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Self::Int(i)
	}
}

impl From<i32> for Value {
	fn from(i: i32) -> Self {
		Self::Int(i64::from(i))
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Self::Float(x)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::Str(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::Str(s)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(items: Vec<T>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}
}

/// Rust types that can stand in for a declared parameter type.
///
/// This is the static replacement for reading type annotations at runtime:
/// `Parameter::of::<i64>("times")` declares an `int` parameter, and
/// `ParsedInvocation::get::<i64>("times")` reads it back.
pub trait ArgValue: Sized {
	/// The declared type for this Rust type.
	fn value_type() -> ValueType;

	/// Extract from a bound value. `None` when the shape does not match.
	fn from_value(value: &Value) -> Option<Self>;

	/// Inclusive bounds for integer types narrower than `i64`.
	fn int_range() -> Option<(i64, i64)> {
		None
	}
}

impl ArgValue for String {
	fn value_type() -> ValueType {
		ValueType::Str
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

impl ArgValue for PathBuf {
	fn value_type() -> ValueType {
		ValueType::Str
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_str().map(PathBuf::from)
	}
}

impl ArgValue for bool {
	fn value_type() -> ValueType {
		ValueType::Bool
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_bool()
	}
}

impl ArgValue for f64 {
	fn value_type() -> ValueType {
		ValueType::Float
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_float()
	}
}

macro_rules! int_arg_value {
	($($ty:ty),*) => {
		$(
			impl ArgValue for $ty {
				fn value_type() -> ValueType {
					ValueType::Int
				}

				fn from_value(value: &Value) -> Option<Self> {
					value.as_int().and_then(|i| <$ty>::try_from(i).ok())
				}

				fn int_range() -> Option<(i64, i64)> {
					let min = i64::try_from(<$ty>::MIN).unwrap_or(i64::MIN);
					let max = i64::try_from(<$ty>::MAX).unwrap_or(i64::MAX);
					if (min, max) == (i64::MIN, i64::MAX) {
						None
					} else {
						Some((min, max))
					}
				}
			}
		)*
	};
}

int_arg_value!(i64, i32, u64, u32, usize);

impl<T: ArgValue> ArgValue for Vec<T> {
	fn value_type() -> ValueType {
		ValueType::List(Box::new(T::value_type()))
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_list()?.iter().map(T::from_value).collect()
	}

	fn int_range() -> Option<(i64, i64)> {
		T::int_range()
	}
}
