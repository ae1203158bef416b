//! Token parsing: binding an `argv`-like token sequence to a signature.
//!
//! Parsing runs in four passes so that error precedence is fixed:
//!
//! 1. **lex** resolves every flag against the signature. Any unknown flag is
//!    reported first, wherever it appears.
//! 2. **bind** assigns flag values and positional tokens to parameters,
//!    detecting duplicate bindings and surplus positionals.
//! 3. **coerce** converts raw tokens to the declared types.
//! 4. **complete** fills defaults and reports missing required parameters.
//!
//! # Grammar
//!
//! - `--name value`, `--name=value`, `-n value`, `-n=value`
//! - `--flag`, `--no-flag`, `--flag=false` for booleans
//! - positional tokens fill positional-or-keyword parameters in order; a
//!   positional list parameter takes every remaining positional token
//! - repeated flags append to list parameters
//! - `--` ends flag parsing
//!
//! # Example
//!
//! ```
//! use commander::{ArgumentParser, Parameter, ParserOptions, Signature, ValueType, Value};
//!
//! let signature = Signature::builder()
//!     .param(Parameter::new("name", ValueType::Str))
//!     .param(Parameter::of::<i64>("times").with_default(1))
//!     .build()
//!     .unwrap();
//!
//! let parser = ArgumentParser::new(&signature, ParserOptions::default());
//! let invocation = parser.parse(["--name", "Ada"]).unwrap();
//! assert_eq!(invocation.value("name"), Some(&Value::from("Ada")));
//! assert_eq!(invocation.value("times"), Some(&Value::Int(1)));
//! ```

mod invocation;

pub use invocation::ParsedInvocation;

use crate::error::{CommanderError, CommanderResult};
use crate::signature::{Parameter, Signature, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Switches that change how flags are recognised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Accept `-` and `_` interchangeably in long flag names.
    #[serde(default = "default_true")]
    pub kebab_case_flags: bool,

    /// Accept `--no-<flag>` to set a boolean parameter to `false`.
    #[serde(default = "default_true")]
    pub negated_flags: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            kebab_case_flags: true,
            negated_flags: true,
        }
    }
}

/// A raw value as it appeared on the command line.
#[derive(Clone, Debug, PartialEq)]
enum RawValue {
    Text(String),
    Switch(bool),
}

#[derive(Debug)]
enum Lexeme {
    Flag { index: usize, value: RawValue },
    Positional(String),
}

#[derive(Default)]
struct Lexed {
    lexemes: Vec<Lexeme>,
    unknown: Option<CommanderError>,
    invalid: Option<CommanderError>,
    missing_value: Option<CommanderError>,
}

#[derive(Default)]
struct Bound {
    slots: Vec<Option<Vec<RawValue>>>,
    duplicate: Option<CommanderError>,
    surplus: Option<CommanderError>,
}

/// Parses token sequences against one signature.
pub struct ArgumentParser<'a> {
    signature: &'a Signature,
    options: ParserOptions,
}

impl<'a> ArgumentParser<'a> {
    /// Create a parser for `signature`.
    pub fn new(signature: &'a Signature, options: ParserOptions) -> Self {
        Self { signature, options }
    }

    /// Parse tokens (without the program name) into a fully bound invocation.
    pub fn parse<I, T>(&self, tokens: I) -> CommanderResult<ParsedInvocation>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();

        let lexed = self.lex(&tokens);
        if let Some(unknown) = lexed.unknown {
            return Err(unknown);
        }

        let bound = self.bind(lexed.lexemes);
        if let Some(surplus) = bound.surplus {
            return Err(surplus);
        }
        if let Some(duplicate) = bound.duplicate {
            return Err(duplicate);
        }
        if let Some(invalid) = lexed.invalid {
            return Err(invalid);
        }

        let mut coerced = Vec::with_capacity(bound.slots.len());
        for (parameter, slot) in self.signature.parameters().iter().zip(bound.slots) {
            let value = match slot {
                Some(raw) => Some(coerce(parameter, raw)?),
                None => None,
            };
            coerced.push(value);
        }

        if let Some(missing) = lexed.missing_value {
            return Err(missing);
        }

        let mut invocation = ParsedInvocation::new();
        for (parameter, value) in self.signature.parameters().iter().zip(coerced) {
            let value = match value.or_else(|| parameter.default.clone()) {
                Some(value) => value,
                None => {
                    return Err(CommanderError::missing_argument(
                        parameter.flag_name(),
                        "required argument was not supplied",
                    ))
                }
            };
            invocation.insert(parameter.name.clone(), value);
        }

        debug!(bindings = invocation.len(), "parsed invocation");
        Ok(invocation)
    }

    fn lex(&self, tokens: &[String]) -> Lexed {
        let mut lexed = Lexed::default();
        let mut flags_done = false;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            i += 1;

            if flags_done || !looks_like_flag(token) {
                lexed.lexemes.push(Lexeme::Positional(token.clone()));
                continue;
            }
            if token == "--" {
                flags_done = true;
                continue;
            }

            let (resolved, inline) = if let Some(long) = token.strip_prefix("--") {
                let (name, inline) = split_inline(long);
                (self.resolve_long(name), inline)
            } else {
                let short = token[1..].chars().next();
                let rest = &token[1 + short.map_or(0, char::len_utf8)..];
                let inline = if let Some(value) = rest.strip_prefix('=') {
                    Some(value.to_string())
                } else if rest.is_empty() {
                    None
                } else {
                    Some(rest.to_string())
                };
                (short.and_then(|c| self.resolve_short(c)), inline)
            };

            let Some((index, negated)) = resolved else {
                if lexed.unknown.is_none() {
                    lexed.unknown = Some(CommanderError::unknown_argument(token.as_str()));
                }
                continue;
            };

            let parameter = &self.signature.parameters()[index];
            let value = if parameter.effective_type().is_bool() {
                match (inline, negated) {
                    (None, negated) => RawValue::Switch(!negated),
                    (Some(text), false) => RawValue::Text(text),
                    (Some(text), true) => {
                        if lexed.invalid.is_none() {
                            lexed.invalid = Some(CommanderError::type_coercion(
                                parameter.flag_name(),
                                text,
                                "no value after a negated flag",
                            ));
                        }
                        continue;
                    }
                }
            } else if let Some(text) = inline {
                RawValue::Text(text)
            } else if i < tokens.len() && !looks_like_flag(&tokens[i]) {
                i += 1;
                RawValue::Text(tokens[i - 1].clone())
            } else {
                if lexed.missing_value.is_none() {
                    lexed.missing_value = Some(CommanderError::missing_argument(
                        parameter.flag_name(),
                        format!("'{}' expects a value", token),
                    ));
                }
                continue;
            };

            lexed.lexemes.push(Lexeme::Flag { index, value });
        }

        lexed
    }

    fn bind(&self, lexemes: Vec<Lexeme>) -> Bound {
        let parameters = self.signature.parameters();
        let mut bound = Bound {
            slots: vec![None; parameters.len()],
            ..Bound::default()
        };
        let mut positionals = Vec::new();

        for lexeme in lexemes {
            match lexeme {
                Lexeme::Positional(token) => positionals.push(token),
                Lexeme::Flag { index, value } => {
                    let parameter = &parameters[index];
                    match &mut bound.slots[index] {
                        Some(values) if parameter.effective_type().is_list() => values.push(value),
                        Some(_) => {
                            if bound.duplicate.is_none() {
                                bound.duplicate =
                                    Some(CommanderError::duplicate_argument(parameter.flag_name()));
                            }
                        }
                        slot @ None => *slot = Some(vec![value]),
                    }
                }
            }
        }

        let mut remaining = positionals.into_iter().peekable();
        for parameter in self.signature.positional_parameters() {
            if remaining.peek().is_none() {
                break;
            }
            let taken: Vec<RawValue> = if parameter.effective_type().is_list() {
                remaining.by_ref().map(RawValue::Text).collect()
            } else {
                remaining.next().map(RawValue::Text).into_iter().collect()
            };

            let Some(index) = self.signature.index_of(&parameter.name) else {
                continue;
            };
            if bound.slots[index].is_some() {
                if bound.duplicate.is_none() {
                    bound.duplicate = Some(CommanderError::duplicate_argument(parameter.flag_name()));
                }
            } else {
                bound.slots[index] = Some(taken);
            }
        }

        if let Some(extra) = remaining.next() {
            bound.surplus = Some(CommanderError::unknown_argument(extra));
        }

        bound
    }

    /// Resolve a long flag name to a parameter index and whether it was negated.
    fn resolve_long(&self, name: &str) -> Option<(usize, bool)> {
        if let Some(index) = self.find_long(name) {
            return Some((index, false));
        }
        if self.options.negated_flags {
            let stripped = name
                .strip_prefix("no-")
                .or_else(|| name.strip_prefix("no_").filter(|_| self.options.kebab_case_flags))?;
            let index = self.find_long(stripped)?;
            if self.signature.parameters()[index].effective_type().is_bool() {
                return Some((index, true));
            }
        }
        None
    }

    fn find_long(&self, name: &str) -> Option<usize> {
        let parameters = self.signature.parameters();
        if self.options.kebab_case_flags {
            let wanted = name.replace('_', "-");
            parameters.iter().position(|p| p.flag_name() == wanted)
        } else {
            parameters.iter().position(|p| p.name == name)
        }
    }

    fn resolve_short(&self, short: char) -> Option<(usize, bool)> {
        self.signature
            .parameters()
            .iter()
            .position(|p| p.short == Some(short))
            .map(|index| (index, false))
    }
}

/// Convert the raw values bound to one parameter into its declared type.
fn coerce(parameter: &Parameter, raw: Vec<RawValue>) -> CommanderResult<Value> {
    let ty = parameter.effective_type();
    let mut values = Vec::with_capacity(raw.len());
    for item in raw {
        let value = match item {
            RawValue::Switch(b) => Value::Bool(b),
            RawValue::Text(text) => ty
                .coerce(&text)
                .and_then(|value| parameter.check_range(&value).map(|()| value))
                .map_err(|expected| {
                    CommanderError::type_coercion(parameter.flag_name(), &text, expected)
                })?,
        };
        values.push(value);
    }

    if ty.is_list() {
        Ok(Value::List(values))
    } else {
        values
            .pop()
            .ok_or_else(|| CommanderError::missing_argument(parameter.flag_name(), "no value was supplied"))
    }
}

/// A token is a flag when it starts with `-`, is not a bare `-`, and is not a
/// negative number. Only `-` followed by a digit or `.` can be a number, so
/// `-nan` and `-inf` stay flags.
fn looks_like_flag(token: &str) -> bool {
    token.starts_with('-') && token != "-" && !is_negative_number(token)
}

fn is_negative_number(token: &str) -> bool {
    let starts_numeric = matches!(
        token[1..].chars().next(),
        Some(c) if c.is_ascii_digit() || c == '.'
    );
    starts_numeric && token.parse::<f64>().is_ok()
}

fn split_inline(long: &str) -> (&str, Option<String>) {
    match long.split_once('=') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (long, None),
    }
}
