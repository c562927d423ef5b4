//! Path pattern compilation.
//!
//! A pattern is parsed once into tokens, from which two functions are derived:
//! a matcher (concrete path to parameters) backed by a regular expression, and
//! a builder (parameters to concrete path) that walks the tokens.
//!
//! # Pattern Syntax
//!
//! - `/users` - literal text, matched exactly
//! - `/users/:id` - named parameter, captures one non-empty segment (excludes `/`)
//! - `/files/*path` - wildcard, captures the rest of the path (includes `/`)
//! - `/objects{/:objectId}` - optional group, may be absent as a whole
//! - `/:"quoted name"` - parameter names that are not identifiers must be quoted
//! - `\` escapes the next character, e.g. `/\(literal\)`
//!
//! The characters `( ) [ ] ? + !` are reserved and must be escaped.

use crate::error::{BuildError, PatternError};
use crate::params::{ParamValue, Params};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Characters reserved for future syntax.
const RESERVED: &[char] = &['(', ')', '[', ']', '?', '+', '!'];

/// Options controlling how a compiled pattern matches paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternOptions {
	/// Match literal text case-sensitively.
	pub case_sensitive: bool,
	/// Reject paths that only differ by a trailing `/`.
	pub strict_trailing_slash: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
	Text(String),
	Param(String),
	Wildcard(String),
	Group(Vec<Token>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParamKey {
	name: String,
	wildcard: bool,
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Parsed tokens, used by the builder.
	tokens: Vec<Token>,
	/// Capture keys in regex group order.
	keys: Vec<ParamKey>,
	/// Compiled matcher.
	regex: Regex,
}

impl PathPattern {
	/// Compiles a pattern with default [`PatternOptions`].
	///
	/// # Errors
	///
	/// Returns a [`PatternError`] if the pattern is malformed or exceeds the
	/// length (1024 bytes) or segment (32) limits.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		Self::with_options(pattern, PatternOptions::default())
	}

	/// Compiles a pattern with explicit matching options.
	pub fn with_options(pattern: &str, options: PatternOptions) -> Result<Self, PatternError> {
		// Reject oversized patterns before building a regex from them
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let tokens = parse(pattern)?;

		let mut keys = Vec::new();
		let mut body = String::new();
		push_regex(&tokens, &mut body, &mut keys);

		let mut seen = HashSet::new();
		for key in &keys {
			if !seen.insert(key.name.as_str()) {
				return Err(PatternError::DuplicateParameter(key.name.clone()));
			}
		}

		let mut regex_str = format!("^(?:{})", body);
		if !options.strict_trailing_slash {
			regex_str.push_str("(?:/)?");
		}
		regex_str.push('$');

		let regex = RegexBuilder::new(&regex_str)
			.case_insensitive(!options.case_sensitive)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex(e.to_string()))?;

		Ok(Self {
			pattern: pattern.to_string(),
			tokens,
			keys,
			regex,
		})
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in the order they appear in the pattern.
	pub fn param_names(&self) -> Vec<&str> {
		self.keys.iter().map(|k| k.name.as_str()).collect()
	}

	/// Returns whether this pattern has no parameters.
	pub fn is_exact(&self) -> bool {
		self.keys.is_empty()
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.matches(path).is_some()
	}

	/// Attempts to match a path against this pattern.
	///
	/// Query string and fragment are ignored. Captured values are
	/// percent-decoded; parameters of an unmatched optional group are absent.
	pub fn matches(&self, path: &str) -> Option<Params> {
		let caps = self.regex.captures(path_portion(path))?;

		let mut params = Params::new();
		for (index, key) in self.keys.iter().enumerate() {
			let Some(m) = caps.get(index + 1) else {
				continue;
			};
			let value = if key.wildcard {
				m.as_str()
					.split('/')
					.map(decode)
					.collect::<Option<Vec<_>>>()?
					.join("/")
			} else {
				decode(m.as_str())?
			};
			params.insert(key.name.clone(), ParamValue::String(value));
		}

		Some(params)
	}

	/// Generates a concrete path from this pattern with the given parameters.
	///
	/// Values are percent-encoded. Optional groups are omitted when one of
	/// their parameters is missing.
	///
	/// # Errors
	///
	/// Returns [`BuildError::MissingParameter`] if a required parameter is
	/// absent, or [`BuildError::InvalidParameter`] if a value cannot fill its
	/// segment.
	pub fn build(&self, params: &Params) -> Result<String, BuildError> {
		let mut path = String::new();
		build_tokens(&self.tokens, params, &mut path)?;
		Ok(path)
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl fmt::Display for PathPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

/// Returns the path portion of a location, without query string or fragment.
pub(crate) fn path_portion(location: &str) -> &str {
	match location.find(|c: char| c == '?' || c == '#') {
		Some(end) => &location[..end],
		None => location,
	}
}

/// Returns the fragment of a location without the leading `#`, if non-empty.
pub(crate) fn fragment(location: &str) -> Option<&str> {
	location
		.split_once('#')
		.map(|(_, hash)| hash)
		.filter(|hash| !hash.is_empty())
}

fn decode(raw: &str) -> Option<String> {
	urlencoding::decode(raw).ok().map(Cow::into_owned)
}

fn parse(pattern: &str) -> Result<Vec<Token>, PatternError> {
	// Open groups: start index and the tokens of the enclosing level
	let mut stack: Vec<(usize, Vec<Token>)> = Vec::new();
	let mut current: Vec<Token> = Vec::new();
	let mut text = String::new();
	let mut chars = pattern.char_indices().peekable();

	while let Some((index, c)) = chars.next() {
		match c {
			'\\' => {
				let (_, escaped) = chars.next().ok_or(PatternError::TrailingEscape)?;
				text.push(escaped);
			}
			':' | '*' => {
				let name = parse_name(&mut chars, index)?;
				flush_text(&mut text, &mut current);
				current.push(if c == ':' {
					Token::Param(name)
				} else {
					Token::Wildcard(name)
				});
			}
			'{' => {
				flush_text(&mut text, &mut current);
				stack.push((index, std::mem::take(&mut current)));
			}
			'}' => {
				flush_text(&mut text, &mut current);
				let (_, parent) = stack
					.pop()
					.ok_or(PatternError::UnbalancedGroup { index })?;
				let group = std::mem::replace(&mut current, parent);
				current.push(Token::Group(group));
			}
			c if RESERVED.contains(&c) => {
				return Err(PatternError::UnexpectedChar { ch: c, index });
			}
			_ => text.push(c),
		}
	}

	if let Some((index, _)) = stack.last() {
		return Err(PatternError::UnterminatedGroup { index: *index });
	}

	flush_text(&mut text, &mut current);
	Ok(current)
}

fn parse_name(
	chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
	marker_index: usize,
) -> Result<String, PatternError> {
	let mut name = String::new();

	if let Some(&(quote_index, '"')) = chars.peek() {
		chars.next();
		loop {
			match chars.next() {
				Some((_, '\\')) => {
					let (_, escaped) = chars.next().ok_or(PatternError::UnterminatedQuote {
						index: quote_index,
					})?;
					name.push(escaped);
				}
				Some((_, '"')) => break,
				Some((_, c)) => name.push(c),
				None => return Err(PatternError::UnterminatedQuote { index: quote_index }),
			}
		}
	} else if let Some(&(_, c)) = chars.peek()
		&& is_id_start(c)
	{
		name.push(c);
		chars.next();
		while let Some(&(_, c)) = chars.peek() {
			if !is_id_continue(c) {
				break;
			}
			name.push(c);
			chars.next();
		}
	}

	if name.is_empty() {
		return Err(PatternError::MissingName {
			index: marker_index,
		});
	}
	Ok(name)
}

fn is_id_start(c: char) -> bool {
	c.is_alphabetic() || c == '_' || c == '$'
}

fn is_id_continue(c: char) -> bool {
	c.is_alphanumeric() || c == '_' || c == '$'
}

fn flush_text(text: &mut String, tokens: &mut Vec<Token>) {
	if !text.is_empty() {
		tokens.push(Token::Text(std::mem::take(text)));
	}
}

fn push_regex(tokens: &[Token], out: &mut String, keys: &mut Vec<ParamKey>) {
	for token in tokens {
		match token {
			Token::Text(text) => out.push_str(&regex::escape(text)),
			Token::Param(name) => {
				out.push_str("([^/]+)");
				keys.push(ParamKey {
					name: name.clone(),
					wildcard: false,
				});
			}
			Token::Wildcard(name) => {
				out.push_str(r"([\s\S]+)");
				keys.push(ParamKey {
					name: name.clone(),
					wildcard: true,
				});
			}
			Token::Group(inner) => {
				out.push_str("(?:");
				push_regex(inner, out, keys);
				out.push_str(")?");
			}
		}
	}
}

fn build_tokens(tokens: &[Token], params: &Params, out: &mut String) -> Result<(), BuildError> {
	for token in tokens {
		match token {
			Token::Text(text) => out.push_str(text),
			Token::Param(name) => {
				let value = segment_value(name, params)?;
				out.push_str(&urlencoding::encode(&value));
			}
			Token::Wildcard(name) => {
				let value = segment_value(name, params)?;
				let encoded: Vec<Cow<'_, str>> =
					value.split('/').map(urlencoding::encode).collect();
				out.push_str(&encoded.join("/"));
			}
			Token::Group(inner) => {
				let mut group = String::new();
				match build_tokens(inner, params, &mut group) {
					Ok(()) => out.push_str(&group),
					Err(BuildError::MissingParameter(_)) => {}
					Err(err) => return Err(err),
				}
			}
		}
	}
	Ok(())
}

fn segment_value(name: &str, params: &Params) -> Result<String, BuildError> {
	let value = params
		.get(name)
		.ok_or_else(|| BuildError::MissingParameter(name.to_string()))?
		.to_string();

	if value.is_empty() {
		return Err(BuildError::InvalidParameter {
			name: name.to_string(),
			reason: "value must not be empty".to_string(),
		});
	}
	Ok(value)
}
