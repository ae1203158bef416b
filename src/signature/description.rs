//! Google-style doc text parsing for command and parameter descriptions.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Description of one parameter, as written in the `Args:` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescription {
	/// Name of the documented parameter.
	pub name: String,
	/// Description text. Continuation lines are joined with `\n`.
	pub description: Option<String>,
}

/// Parsed doc text of a callable.
///
/// # Example
///
/// ```
/// use commander::Description;
///
/// let description = Description::parse(
///     "Greet someone.
///
///     Args:
///         name: Who to greet.
///         times: How many times.
///     ",
/// );
/// assert_eq!(description.short_description.as_deref(), Some("Greet someone."));
/// assert_eq!(description.parameter_descriptions.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
	/// The first line.
	pub short_description: Option<String>,
	/// Lines after the first one, up to the first section header.
	pub long_description: Option<String>,
	/// Entries of the `Args:` section, in order.
	pub parameter_descriptions: Vec<ParameterDescription>,
	/// Text of the `Raises:` section.
	pub raises_description: Option<String>,
	/// Text of the `Returns:` section.
	pub result_description: Option<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
	Summary,
	Args,
	Returns,
	Raises,
	Other,
}

fn section_header() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"(?i)^([a-z][a-z ]*):\s*$").expect("static regex"))
}

fn argument_entry() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^\*{0,2}([A-Za-z_][A-Za-z0-9_-]*)\s*(?:\([^)]*\))?\s*:\s*(.*)$")
			.expect("static regex")
	})
}

fn classify(header: &str) -> Section {
	match header.to_ascii_lowercase().as_str() {
		"args" | "arguments" | "parameters" | "params" | "keyword args" | "keyword arguments" => {
			Section::Args
		}
		"returns" | "return" | "yields" | "yield" => Section::Returns,
		"raises" | "raise" | "exceptions" | "except" => Section::Raises,
		_ => Section::Other,
	}
}

impl Description {
	/// Parse a Google-style doc text.
	///
	/// Missing text, blank text and the literal `None` all yield an empty
	/// description.
	pub fn parse(text: &str) -> Self {
		let lines = clean_lines(text);
		let mut description = Self::default();

		let mut section = Section::Summary;
		let mut summary: Vec<&str> = Vec::new();
		let mut returns: Vec<&str> = Vec::new();
		let mut raises: Vec<&str> = Vec::new();
		let mut entry_indent: Option<usize> = None;

		for line in &lines {
			let trimmed = line.trim();
			let indent = indent_of(line);

			if indent == 0 {
				if let Some(caps) = section_header().captures(trimmed) {
					section = classify(&caps[1]);
					entry_indent = None;
					continue;
				}
			}

			match section {
				Section::Summary => summary.push(line.as_str()),
				Section::Returns => returns.push(trimmed),
				Section::Raises => raises.push(trimmed),
				Section::Other => {}
				Section::Args => {
					if trimmed.is_empty() {
						continue;
					}
					let base = *entry_indent.get_or_insert(indent);
					if indent <= base {
						if let Some(caps) = argument_entry().captures(trimmed) {
							description.parameter_descriptions.push(ParameterDescription {
								name: caps[1].to_string(),
								description: non_empty(caps[2].trim()),
							});
						}
					} else if let Some(last) = description.parameter_descriptions.last_mut() {
						last.description = Some(match last.description.take() {
							Some(existing) => format!("{}\n{}", existing, trimmed),
							None => trimmed.to_string(),
						});
					}
				}
			}
		}

		let mut summary_iter = summary.into_iter();
		description.short_description = summary_iter
			.next()
			.map(str::trim)
			.filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("none"))
			.map(str::to_string);
		let long: Vec<&str> = summary_iter.collect();
		description.long_description = non_empty(long.join("\n").trim());
		description.result_description = non_empty(returns.join("\n").trim());
		description.raises_description = non_empty(raises.join("\n").trim());

		description
	}

	/// Whether nothing was documented.
	pub fn is_empty(&self) -> bool {
		self == &Self::default()
	}

	/// Look up the description of a parameter.
	pub fn parameter(&self, name: &str) -> Option<&ParameterDescription> {
		self.parameter_descriptions.iter().find(|p| p.name == name)
	}
}

/// Strip the doc text like a docstring cleaner: the first line loses its
/// leading whitespace, the rest lose their common indentation, and leading
/// or trailing blank lines are dropped.
fn clean_lines(text: &str) -> Vec<String> {
	let raw: Vec<&str> = text.lines().collect();
	if raw.is_empty() {
		return Vec::new();
	}

	let margin = raw
		.iter()
		.skip(1)
		.filter(|l| !l.trim().is_empty())
		.map(|l| indent_of(l))
		.min()
		.unwrap_or(0);

	let mut lines: Vec<String> = Vec::with_capacity(raw.len());
	lines.push(raw[0].trim().to_string());
	for line in raw.iter().skip(1) {
		if line.trim().is_empty() {
			lines.push(String::new());
		} else {
			lines.push(line[margin.min(line.len())..].trim_end().to_string());
		}
	}

	while lines.first().map_or(false, |l| l.is_empty()) {
		lines.remove(0);
	}
	while lines.last().map_or(false, |l| l.is_empty()) {
		lines.pop();
	}
	lines
}

fn indent_of(line: &str) -> usize {
	line.len() - line.trim_start_matches(|c| c == ' ' || c == '\t').len()
}

fn non_empty(s: &str) -> Option<String> {
	if s.is_empty() {
		None
	} else {
		Some(s.to_string())
	}
}
