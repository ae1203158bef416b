//! What a command returns to the adapter.

use serde::Serialize;

/// Result of a successful command call.
///
/// The adapter writes `Text` and `Json` to stdout and exits 0. `ExitCode`
/// writes nothing and exits with the given code.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Outcome {
	/// Nothing to print.
	#[default]
	Unit,
	/// Text printed followed by a newline.
	Text(String),
	/// JSON printed in pretty form.
	Json(serde_json::Value),
	/// An explicit process exit code.
	ExitCode(i32),
}

impl Outcome {
	/// Text output.
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}

	/// JSON output of any serializable value.
	pub fn json<T: Serialize>(value: &T) -> anyhow::Result<Self> {
		Ok(Self::Json(serde_json::to_value(value)?))
	}

	/// An explicit exit code.
	pub fn exit(code: i32) -> Self {
		Self::ExitCode(code)
	}

	/// The exit code this outcome maps to.
	pub fn exit_code(&self) -> i32 {
		match self {
			Self::ExitCode(code) => *code,
			_ => 0,
		}
	}
}

impl From<()> for Outcome {
	fn from(_: ()) -> Self {
		Self::Unit
	}
}

impl From<String> for Outcome {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<&str> for Outcome {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<serde_json::Value> for Outcome {
	fn from(value: serde_json::Value) -> Self {
		Self::Json(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_exit_codes() {
		assert_eq!(Outcome::Unit.exit_code(), 0);
		assert_eq!(Outcome::text("hi").exit_code(), 0);
		assert_eq!(Outcome::exit(3).exit_code(), 3);
	}

	#[test]
	fn test_conversions() {
		assert_eq!(Outcome::from(()), Outcome::Unit);
		assert_eq!(Outcome::from("hi"), Outcome::Text("hi".to_string()));
		assert_eq!(Outcome::from(json!({"a": 1})), Outcome::Json(json!({"a": 1})));
	}

	#[test]
	fn test_json_of_struct() {
		#[derive(Serialize)]
		struct Point {
			x: i32,
			y: i32,
		}
		let outcome = Outcome::json(&Point { x: 1, y: 2 }).unwrap();
		assert_eq!(outcome, Outcome::Json(json!({"x": 1, "y": 2})));
	}
}
