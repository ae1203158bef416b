//! Signature reading: the static description of a callable's inputs.
//!
//! Rust has no runtime view of a function's parameters, so a command declares
//! them up front. A [`Signature`] is an ordered list of [`Parameter`]
//! descriptors, each with a name, a [`ParameterKind`], an optional
//! [`ValueType`], an optional default and an optional description.
//! Descriptions can be read from Google-style doc text with
//! [`Description::parse`].
//!
//! # Declaring a signature
//!
//! ```
//! use commander::{Parameter, Signature, ValueType};
//!
//! let signature = Signature::builder()
//!     .param(Parameter::new("name", ValueType::Str))
//!     .param(Parameter::of::<i64>("times").with_default(1))
//!     .tagged("mode", "enum[loud|quiet]")
//!     .doc(
//!         "Greet someone.
//!
//!         Args:
//!             name: Who to greet.
//!             times: How many times to repeat the greeting.
//!             mode: How to say it.
//!         ",
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(signature.len(), 3);
//! assert_eq!(
//!     signature.get_parameter("name").unwrap().description.as_deref(),
//!     Some("Who to greet.")
//! );
//! ```

mod description;
mod parameter;
#[allow(clippy::module_inception)]
mod signature;
mod value;
mod value_type;

pub use description::{Description, ParameterDescription};
pub use parameter::{Parameter, ParameterKind};
pub use signature::{Signature, SignatureBuilder};
pub use value::{ArgValue, Value};
pub use value_type::ValueType;
