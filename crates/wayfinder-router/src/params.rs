//! Route parameter values.
//!
//! Matching always produces string values. Values supplied for name-based
//! navigation may also be numbers or booleans; they are stringified when a
//! concrete path is built and kept as-is in the history payload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter map keyed by parameter name.
///
/// Ordered so that structural comparison and the serialized history payload
/// do not depend on insertion order.
pub type Params = BTreeMap<String, ParamValue>;

/// A single route parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// Boolean value.
	Bool(bool),
	/// Numeric value (integer or float).
	Number(serde_json::Number),
	/// String value.
	String(String),
}

impl ParamValue {
	/// Returns the string slice if this is a string value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Converts the value to a JSON value, used when spreading params into props.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Bool(b) => serde_json::Value::Bool(*b),
			Self::Number(n) => serde_json::Value::Number(n.clone()),
			Self::String(s) => serde_json::Value::String(s.clone()),
		}
	}
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(b) => write!(f, "{}", b),
			Self::Number(n) => write!(f, "{}", n),
			Self::String(s) => f.write_str(s),
		}
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for ParamValue {
				fn from(value: $ty) -> Self {
					Self::Number(serde_json::Number::from(value))
				}
			}
		)*
	};
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Builds a [`Params`] map from `key => value` pairs.
///
/// ```
/// use wayfinder_router::{ParamValue, params};
///
/// let p = params! { "id" => 42, "slug" => "hello" };
/// assert_eq!(p.get("slug"), Some(&ParamValue::from("hello")));
/// ```
#[macro_export]
macro_rules! params {
	() => {
		$crate::Params::new()
	};
	($($key:expr => $value:expr),+ $(,)?) => {{
		let mut map = $crate::Params::new();
		$(
			map.insert(::std::string::String::from($key), $crate::ParamValue::from($value));
		)+
		map
	}};
}
