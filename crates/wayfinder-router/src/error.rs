//! Error types for route compilation, path building and history access.
//!
//! Absence of a match is not an error: the table reports it as `None` and the
//! navigator as [`NavigationOutcome::NoMatch`](crate::NavigationOutcome::NoMatch).

use thiserror::Error;

/// A malformed path pattern, reported when the route table is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
	/// Pattern exceeds the maximum allowed length.
	#[error("pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Length of the rejected pattern in bytes.
		length: usize,
		/// Maximum accepted length.
		max: usize,
	},

	/// Pattern has more path segments than allowed.
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Number of `/`-separated segments.
		count: usize,
		/// Maximum accepted segment count.
		max: usize,
	},

	/// A reserved character appeared unescaped.
	#[error("unexpected '{ch}' at index {index} (escape it with a backslash to match it literally)")]
	UnexpectedChar {
		/// The offending character.
		ch: char,
		/// Byte index in the pattern.
		index: usize,
	},

	/// `:` or `*` was not followed by a parameter name.
	#[error("missing parameter name at index {index}")]
	MissingName {
		/// Byte index of the `:` or `*`.
		index: usize,
	},

	/// A `}` without a matching `{`.
	#[error("unbalanced '}}' at index {index}")]
	UnbalancedGroup {
		/// Byte index of the `}`.
		index: usize,
	},

	/// A `{` that is never closed.
	#[error("unterminated optional group starting at index {index}")]
	UnterminatedGroup {
		/// Byte index of the `{`.
		index: usize,
	},

	/// A quoted parameter name without its closing quote.
	#[error("unterminated quoted parameter name at index {index}")]
	UnterminatedQuote {
		/// Byte index of the opening quote.
		index: usize,
	},

	/// The pattern ends with a lone `\`.
	#[error("pattern ends with an unfinished escape sequence")]
	TrailingEscape,

	/// The same parameter name is used twice.
	#[error("duplicate parameter name '{0}'")]
	DuplicateParameter(String),

	/// The generated regular expression could not be compiled.
	#[error("failed to compile pattern regex: {0}")]
	Regex(String),
}

/// Failure to build a concrete path from a pattern and a parameter map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
	/// A required parameter was not supplied.
	#[error("missing parameter: {0}")]
	MissingParameter(String),

	/// A supplied parameter cannot be placed in its segment.
	#[error("invalid value for parameter '{name}': {reason}")]
	InvalidParameter {
		/// Parameter name.
		name: String,
		/// Why the value was rejected.
		reason: String,
	},
}

/// Failure of the host history API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
	/// The host environment is unavailable (no window, no history object).
	#[error("history unavailable: {0}")]
	Unavailable(String),

	/// A history payload could not be converted to or from JSON.
	#[error("history payload serialization failed: {0}")]
	Serialization(String),

	/// The host rejected the operation.
	#[error("history operation failed: {0}")]
	Operation(String),
}

impl From<serde_json::Error> for HistoryError {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}

/// Error type for router construction and reverse lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RouterError {
	/// A route pattern failed to compile.
	#[error("invalid route pattern '{pattern}' (route #{index}): {source}")]
	Compile {
		/// Position of the route in the definition list.
		index: usize,
		/// The rejected pattern.
		pattern: String,
		/// Underlying pattern error.
		source: PatternError,
	},

	/// No route carries the requested name.
	#[error("invalid route name: {0}")]
	InvalidRouteName(String),

	/// Every route with the requested name rejected the parameters.
	#[error(transparent)]
	Build(#[from] BuildError),

	/// The host history API failed.
	#[error(transparent)]
	History(#[from] HistoryError),
}
