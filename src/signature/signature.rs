//! The declared signature of a callable: its ordered parameters and docs.

use crate::error::{CommanderError, CommanderResult};
use crate::signature::{Description, Parameter};
use serde::{Deserialize, Serialize};

/// Ordered set of parameter descriptors plus the callable's description.
///
/// A `Signature` only ever holds parameters that passed validation, so every
/// operation on it can assume unique names, unique flags and well-typed
/// defaults.
///
/// # Example
///
/// ```
/// use commander::{Parameter, Signature, ValueType};
///
/// let signature = Signature::builder()
///     .param(Parameter::new("name", ValueType::Str))
///     .param(Parameter::of::<i64>("times").with_default(1))
///     .build()
///     .unwrap();
///
/// assert!(signature.has_parameter("times"));
/// assert_eq!(signature.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
	parameters: Vec<Parameter>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	description: Option<Description>,
}

impl Signature {
	/// Create an empty signature.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a builder that collects parameters and reports the first
	/// problem from [`SignatureBuilder::build`].
	pub fn builder() -> SignatureBuilder {
		SignatureBuilder::default()
	}

	/// Add a parameter, rejecting anything that would make the signature
	/// ambiguous on the command line.
	///
	/// Returns `self` so additions can be chained with `?`.
	pub fn add_parameter(&mut self, parameter: Parameter) -> CommanderResult<&mut Self> {
		parameter.validate()?;

		let flag_name = parameter.flag_name();
		if let Some(existing) = self.parameters.iter().find(|p| p.flag_name() == flag_name) {
			let message = if existing.name == parameter.name {
				"parameter is declared twice".to_string()
			} else {
				format!("flag '--{}' collides with parameter '{}'", flag_name, existing.name)
			};
			return Err(CommanderError::signature(&parameter.name, message));
		}

		if let Some(short) = parameter.short {
			if let Some(existing) = self.parameters.iter().find(|p| p.short == Some(short)) {
				return Err(CommanderError::signature(
					&parameter.name,
					format!("short flag '-{}' is already used by '{}'", short, existing.name),
				));
			}
		}

		if parameter.accepts_positional() {
			if let Some(variadic) = self
				.positional_parameters()
				.find(|p| p.effective_type().is_list())
			{
				return Err(CommanderError::signature(
					&parameter.name,
					format!(
						"positional parameter follows the list parameter '{}', which consumes every remaining token; make one of them keyword-only",
						variadic.name
					),
				));
			}
		}

		self.parameters.push(parameter);
		Ok(self)
	}

	/// Attach a parsed description, copying each documented parameter's text
	/// onto the matching descriptor.
	///
	/// Documenting a parameter that is not declared is a signature error.
	/// Descriptions set explicitly on a parameter are kept.
	pub fn with_description(mut self, description: Description) -> CommanderResult<Self> {
		for documented in &description.parameter_descriptions {
			let parameter = self
				.parameters
				.iter_mut()
				.find(|p| p.name == documented.name)
				.ok_or_else(|| {
					CommanderError::signature(
						&documented.name,
						"documented parameter is not declared",
					)
				})?;
			if parameter.description.is_none() {
				parameter.description = documented.description.clone();
			}
		}
		self.description = Some(description);
		Ok(self)
	}

	/// All parameters in declaration order.
	pub fn parameters(&self) -> &[Parameter] {
		&self.parameters
	}

	/// Parameters that can bind positional tokens, in declaration order.
	pub fn positional_parameters(&self) -> impl Iterator<Item = &Parameter> {
		self.parameters.iter().filter(|p| p.accepts_positional())
	}

	/// The attached description, if any.
	pub fn description(&self) -> Option<&Description> {
		self.description.as_ref()
	}

	/// Check whether a parameter with this name is declared.
	pub fn has_parameter(&self, name: &str) -> bool {
		self.get_parameter(name).is_some()
	}

	/// Get a parameter by name.
	pub fn get_parameter(&self, name: &str) -> Option<&Parameter> {
		self.parameters.iter().find(|p| p.name == name)
	}

	/// Index of a parameter by name.
	pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
		self.parameters.iter().position(|p| p.name == name)
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.parameters.len()
	}

	/// Whether the signature declares no parameters.
	pub fn is_empty(&self) -> bool {
		self.parameters.is_empty()
	}
}

/// Fluent builder for [`Signature`].
///
/// Declarations are checked only in `build`, which returns the first
/// problem, so a whole signature can be written as a single expression.
/// The builder is cheap to clone and building it twice yields equal
/// signatures.
#[derive(Clone, Debug, Default)]
pub struct SignatureBuilder {
	declarations: Vec<Declaration>,
	doc: Option<String>,
}

#[derive(Clone, Debug)]
enum Declaration {
	Parameter(Parameter),
	Tagged { name: String, tag: String },
}

impl SignatureBuilder {
	/// Add a parameter.
	pub fn param(mut self, parameter: Parameter) -> Self {
		self.declarations.push(Declaration::Parameter(parameter));
		self
	}

	/// Add a parameter declared by a type tag; an unsupported tag fails the build.
	pub fn tagged(mut self, name: impl Into<String>, tag: impl Into<String>) -> Self {
		self.declarations.push(Declaration::Tagged {
			name: name.into(),
			tag: tag.into(),
		});
		self
	}

	/// Attach Google-style doc text for the callable.
	pub fn doc(mut self, text: impl Into<String>) -> Self {
		self.doc = Some(text.into());
		self
	}

	/// Build the signature.
	pub fn build(&self) -> CommanderResult<Signature> {
		let mut signature = Signature::new();
		for declaration in &self.declarations {
			let parameter = match declaration {
				Declaration::Parameter(parameter) => parameter.clone(),
				Declaration::Tagged { name, tag } => Parameter::tagged(name.clone(), tag)?,
			};
			signature.add_parameter(parameter)?;
		}
		match &self.doc {
			Some(text) => signature.with_description(Description::parse(text)),
			None => Ok(signature),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::signature::{ParameterKind, Value, ValueType};

	fn greet() -> SignatureBuilder {
		Signature::builder()
			.param(Parameter::new("name", ValueType::Str))
			.param(Parameter::of::<i64>("times").with_default(1))
	}

	#[test]
	fn test_add_parameter_chaining() {
		let mut signature = Signature::new();
		signature
			.add_parameter(Parameter::of::<String>("a"))
			.unwrap()
			.add_parameter(Parameter::of::<i64>("b").with_default(5))
			.unwrap();
		assert_eq!(signature.len(), 2);
		assert!(signature.has_parameter("a"));
		assert!(signature.has_parameter("b"));
	}

	#[test]
	fn test_has_and_get_parameter() {
		let signature = greet().build().unwrap();
		assert!(signature.has_parameter("name"));
		assert!(!signature.has_parameter("test"));

		let times = signature.get_parameter("times").unwrap();
		assert_eq!(times.default, Some(Value::Int(1)));
		assert_eq!(times.value_type, Some(ValueType::Int));
		assert_eq!(times.kind, ParameterKind::PositionalOrKeyword);
		assert!(signature.get_parameter("test").is_none());
	}

	#[test]
	fn test_build_is_idempotent() {
		let builder = greet().doc("Greet someone.\n\nArgs:\n    name: Who.\n");
		assert_eq!(builder.build().unwrap(), builder.build().unwrap());
	}

	#[test]
	fn test_duplicate_name_rejected() {
		let result = greet().param(Parameter::of::<String>("name")).build();
		match result {
			Err(CommanderError::Signature { parameter, message }) => {
				assert_eq!(parameter, "name");
				assert!(message.contains("twice"));
			}
			other => panic!("Expected Signature error, got {:?}", other),
		}
	}

	#[test]
	fn test_flag_collision_rejected() {
		let result = Signature::builder()
			.param(Parameter::flag("dry_run"))
			.param(Parameter::flag("dry-run"))
			.build();
		assert!(matches!(result, Err(CommanderError::Signature { .. })));
	}

	#[test]
	fn test_short_collision_rejected() {
		let result = Signature::builder()
			.param(Parameter::of::<String>("name").with_short('n'))
			.param(Parameter::of::<i64>("number").with_short('n').with_default(0))
			.build();
		match result {
			Err(CommanderError::Signature { parameter, .. }) => assert_eq!(parameter, "number"),
			other => panic!("Expected Signature error, got {:?}", other),
		}
	}

	#[test]
	fn test_positional_after_list_rejected() {
		let result = Signature::builder()
			.param(Parameter::of::<Vec<String>>("files"))
			.param(Parameter::of::<String>("target"))
			.build();
		assert!(matches!(result, Err(CommanderError::Signature { .. })));

		let ok = Signature::builder()
			.param(Parameter::of::<Vec<String>>("files"))
			.param(Parameter::of::<String>("target").keyword_only())
			.build();
		assert!(ok.is_ok());
	}

	#[test]
	fn test_unsupported_tag_fails_build() {
		let result = greet().tagged("options", "dict").build();
		match result {
			Err(CommanderError::Signature { parameter, .. }) => assert_eq!(parameter, "options"),
			other => panic!("Expected Signature error, got {:?}", other),
		}
	}

	#[test]
	fn test_with_description() {
		let signature = greet()
			.doc(
				"Greet someone.
				Args:
				    name: Who to greet.
				    times: How many times.
				",
			)
			.build()
			.unwrap();

		let description = signature.description().unwrap();
		assert_eq!(description.short_description.as_deref(), Some("Greet someone."));
		assert_eq!(
			signature.get_parameter("name").unwrap().description.as_deref(),
			Some("Who to greet.")
		);
		assert_eq!(
			signature.get_parameter("times").unwrap().description.as_deref(),
			Some("How many times.")
		);
	}

	#[test]
	fn test_explicit_description_wins() {
		let signature = Signature::builder()
			.param(Parameter::of::<String>("name").with_description("Explicit"))
			.doc("Args:\n    name: From the doc.\n")
			.build()
			.unwrap();
		assert_eq!(
			signature.get_parameter("name").unwrap().description.as_deref(),
			Some("Explicit")
		);
	}

	#[test]
	fn test_undeclared_documented_parameter() {
		let result = greet().doc("Args:\n    colour: Not a parameter.\n").build();
		match result {
			Err(CommanderError::Signature { parameter, .. }) => assert_eq!(parameter, "colour"),
			other => panic!("Expected Signature error, got {:?}", other),
		}
	}

	#[test]
	fn test_positional_parameters_skip_flags() {
		let signature = Signature::builder()
			.param(Parameter::of::<String>("src"))
			.param(Parameter::flag("force"))
			.param(Parameter::of::<String>("mode").keyword_only().with_default("copy"))
			.param(Parameter::of::<String>("dst"))
			.build()
			.unwrap();
		let names: Vec<&str> = signature.positional_parameters().map(|p| p.name.as_str()).collect();
		assert_eq!(names, vec!["src", "dst"]);
		assert_eq!(signature.index_of("dst"), Some(3));
	}
}
