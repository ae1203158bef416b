//! The concrete argument bindings produced by one parse.

use crate::error::{CommanderError, CommanderResult};
use crate::signature::{ArgValue, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Mapping from parameter name to its bound value, in declaration order.
///
/// After a successful parse every parameter of the signature is present:
/// either with the value from the command line or with its default.
///
/// # Example
///
/// ```
/// use commander::{ParsedInvocation, Value};
///
/// let invocation: ParsedInvocation = vec![
///     ("name", Value::from("Ada")),
///     ("times", Value::from(2)),
/// ]
/// .into_iter()
/// .collect();
///
/// let times: i64 = invocation.get("times").unwrap();
/// assert_eq!(times, 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedInvocation {
    values: Vec<(String, Value)>,
}

impl ParsedInvocation {
    /// Create an empty invocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value, replacing an existing binding with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    /// The raw bound value.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// The bound value converted to a Rust type.
    ///
    /// A missing binding is a [`CommanderError::MissingArgument`]; a value of
    /// the wrong shape is a [`CommanderError::TypeCoercion`].
    pub fn get<T: ArgValue>(&self, name: &str) -> CommanderResult<T> {
        let value = self.value(name).ok_or_else(|| {
            CommanderError::missing_argument(name, "no value is bound for this parameter")
        })?;
        T::from_value(value).ok_or_else(|| {
            CommanderError::type_coercion(name, value.to_string(), T::value_type().to_string())
        })
    }

    /// Like [`get`](Self::get), but an unbound name is `Ok(None)`. A bound
    /// value of the wrong shape is still a [`CommanderError::TypeCoercion`].
    pub fn get_optional<T: ArgValue>(&self, name: &str) -> CommanderResult<Option<T>> {
        if self.contains(name) {
            self.get(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Check whether a parameter is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Iterate over bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as a JSON object, for logging.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for ParsedInvocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParsedInvocation {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut invocation = Self::new();
        for (name, value) in iter {
            invocation.insert(name, value);
        }
        invocation
    }
}
