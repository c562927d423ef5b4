//! Route matching property-based tests
//!
//! Property tests for first-match resolution, path building and navigation
//! state consistency.

#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use wayfinder_router::{
	MemoryHistory, ParamValue, Params, PathPattern, PatternOptions, RouteDefinition, RouteTable,
	Router,
};

const PATTERNS: &[&str] = &[
	"/",
	"/users",
	"/users/:id",
	"/users/:id/posts{/:slug}",
	"/files/*path",
	"/:lang/docs",
	"/*rest",
];

fn table() -> RouteTable<usize> {
	let definitions = PATTERNS
		.iter()
		.enumerate()
		.map(|(index, pattern)| RouteDefinition::component(*pattern, index))
		.collect();
	RouteTable::build(definitions, PatternOptions::default()).unwrap()
}

fn path_strategy() -> impl Strategy<Value = String> {
	let segment = prop_oneof![
		Just("users".to_string()),
		Just("posts".to_string()),
		Just("files".to_string()),
		Just("docs".to_string()),
		"[a-zA-Z0-9%_.-]{1,8}",
	];
	(prop::collection::vec(segment, 0..5), any::<bool>(), "(\\?[a-z=]{0,6})?(#[a-z]{0,6})?")
		.prop_map(|(segments, trailing, suffix)| {
			let mut path = format!("/{}", segments.join("/"));
			if trailing && !segments.is_empty() {
				path.push('/');
			}
			path.push_str(&suffix);
			path
		})
}

// ============================================================================
// Property-Based Tests: RouteTable
// ============================================================================

proptest! {
	/// Test: table resolution equals a linear first-match scan
	///
	/// Category: Property
	/// Verifies that the compiled table picks the first pattern, in order,
	/// that accepts the path.
	#[test]
	fn prop_first_match_equals_linear_scan(path in path_strategy()) {
		let table = table();
		let patterns: Vec<PathPattern> = PATTERNS
			.iter()
			.map(|pattern| PathPattern::new(pattern).unwrap())
			.collect();

		let expected = patterns.iter().position(|pattern| pattern.is_match(&path));
		let actual = table.match_path(&path).map(|m| m.route.id().index());

		prop_assert_eq!(actual, expected);
		if let Some(m) = table.match_path(&path) {
			prop_assert_eq!(m.params, patterns[m.route.id().index()].matches(&path).unwrap());
		}
	}

	/// Test: built paths match back to the same params
	///
	/// Category: Property
	/// Verifies that any non-empty values survive encoding into a path and
	/// decoding out of it.
	#[test]
	fn prop_built_path_matches_params(id in "\\PC{1,12}", slug in proptest::option::of("\\PC{1,12}")) {
		let pattern = PathPattern::new("/users/:id/posts{/:slug}").unwrap();
		let mut params = Params::new();
		params.insert("id".to_string(), ParamValue::from(id.as_str()));
		if let Some(slug) = &slug {
			params.insert("slug".to_string(), ParamValue::from(slug.as_str()));
		}

		let path = pattern.build(&params).unwrap();

		prop_assert_eq!(pattern.matches(&path), Some(params));
	}
}

// ============================================================================
// Property-Based Tests: Router
// ============================================================================

proptest! {
	/// Test: navigation updates the whole state or none of it
	///
	/// Category: Property
	/// Verifies that after any sequence of navigations, the active route is
	/// the one matching the active path, with the params that path yields.
	#[test]
	fn prop_state_is_consistent(paths in prop::collection::vec(path_strategy(), 1..8)) {
		let definitions = PATTERNS[..PATTERNS.len() - 1]
			.iter()
			.enumerate()
			.map(|(index, pattern)| RouteDefinition::component(*pattern, index))
			.collect();
		let router = Router::new(definitions, MemoryHistory::new("/")).unwrap();

		for path in &paths {
			let before = router.state();
			let navigated = router.navigate(path.as_str());

			let state = router.state();
			if navigated {
				let matched = router.match_path(state.active_path()).unwrap();
				prop_assert_eq!(state.active_route(), Some(matched.route.id()));
				prop_assert_eq!(state.active_params(), &matched.params);
			} else {
				prop_assert_eq!(state, before);
			}
		}
	}
}
