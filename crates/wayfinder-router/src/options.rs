//! Engine-wide router configuration.
//!
//! Options deserialize with defaults for every missing field, so an
//! application can load them from whatever settings source it already uses:
//!
//! ```
//! use wayfinder_router::RouterOptions;
//!
//! let options: RouterOptions = serde_json::from_str(r#"{ "route_prop": true }"#).unwrap();
//! assert!(options.route_prop);
//! assert!(!options.params_to_props);
//! ```

use crate::pattern::PatternOptions;
use serde::{Deserialize, Serialize};

/// Configuration shared by every route of a router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
	/// Inject the current-route descriptor as the `route` prop of every view.
	///
	/// Overridable per route.
	pub route_prop: bool,
	/// Spread matched params as individual props of every view.
	///
	/// Overridable per route.
	pub params_to_props: bool,
	/// Match literal pattern text case-sensitively.
	pub case_sensitive: bool,
	/// Do not accept a trailing `/` that the pattern lacks.
	pub strict_trailing_slash: bool,
}

impl RouterOptions {
	/// Creates options with every flag off.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the engine-wide `route_prop` default.
	pub fn with_route_prop(mut self, enabled: bool) -> Self {
		self.route_prop = enabled;
		self
	}

	/// Sets the engine-wide `params_to_props` default.
	pub fn with_params_to_props(mut self, enabled: bool) -> Self {
		self.params_to_props = enabled;
		self
	}

	/// Sets case-sensitive matching.
	pub fn with_case_sensitive(mut self, enabled: bool) -> Self {
		self.case_sensitive = enabled;
		self
	}

	/// Sets strict trailing-slash matching.
	pub fn with_strict_trailing_slash(mut self, enabled: bool) -> Self {
		self.strict_trailing_slash = enabled;
		self
	}

	/// Returns the pattern matching options derived from these settings.
	pub fn pattern_options(&self) -> PatternOptions {
		PatternOptions {
			case_sensitive: self.case_sensitive,
			strict_trailing_slash: self.strict_trailing_slash,
		}
	}
}
