//! The compiled route table.
//!
//! Routes are compiled eagerly, in definition order, so a malformed pattern
//! fails construction instead of the first navigation that reaches it.
//! Resolution is first-match-wins: specific patterns must precede catch-alls.

use crate::error::{BuildError, RouterError};
use crate::params::Params;
use crate::pattern::{PathPattern, PatternOptions};
use crate::route::{CompiledRoute, RouteDefinition, RouteId};

/// A route matched by path, with its extracted parameters.
#[derive(Debug)]
pub struct PathMatch<'a, C> {
	/// The matched route.
	pub route: &'a CompiledRoute<C>,
	/// Extracted path parameters.
	pub params: Params,
}

/// A route matched by name, with the concrete path built from the parameters.
#[derive(Debug)]
pub struct NameMatch<'a, C> {
	/// The matched route.
	pub route: &'a CompiledRoute<C>,
	/// The built path.
	pub path: String,
}

/// An ordered, immutable list of compiled routes.
#[derive(Debug, Clone)]
pub struct RouteTable<C> {
	routes: Vec<CompiledRoute<C>>,
}

impl<C> RouteTable<C> {
	/// Compiles every definition in order, assigning zero-based ordinals.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Compile`] for the first malformed pattern.
	pub fn build(
		definitions: Vec<RouteDefinition<C>>,
		options: PatternOptions,
	) -> Result<Self, RouterError> {
		let routes = definitions
			.into_iter()
			.enumerate()
			.map(|(index, definition)| {
				let pattern = PathPattern::with_options(definition.path(), options).map_err(
					|source| RouterError::Compile {
						index,
						pattern: definition.path().to_string(),
						source,
					},
				)?;
				Ok(CompiledRoute::new(index, pattern, definition))
			})
			.collect::<Result<Vec<_>, RouterError>>()?;

		tracing::debug!(routes = routes.len(), "route table built");
		Ok(Self { routes })
	}

	/// Returns the first route whose pattern matches `path`.
	///
	/// Query string and fragment do not participate in matching.
	pub fn match_path(&self, path: &str) -> Option<PathMatch<'_, C>> {
		self.routes.iter().find_map(|route| {
			route
				.pattern()
				.matches(path)
				.map(|params| PathMatch { route, params })
		})
	}

	/// Returns the first route named `name` that can build a path from `params`.
	///
	/// Candidates sharing a name are tried in table order; a candidate whose
	/// parameters do not fit is skipped rather than failing the lookup.
	pub fn match_name(&self, name: &str, params: &Params) -> Option<NameMatch<'_, C>> {
		self.try_build(name, params).ok()
	}

	/// Builds the path for a named route.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidRouteName`] if no route has that name, or
	/// the build error of the last candidate if none accepts the parameters.
	pub fn reverse(&self, name: &str, params: &Params) -> Result<String, RouterError> {
		self.try_build(name, params).map(|m| m.path)
	}

	fn try_build(&self, name: &str, params: &Params) -> Result<NameMatch<'_, C>, RouterError> {
		let mut last_error: Option<BuildError> = None;

		for route in self.routes.iter().filter(|r| r.name() == Some(name)) {
			match route.pattern().build(params) {
				Ok(path) => return Ok(NameMatch { route, path }),
				Err(err) => {
					tracing::trace!(route = %route.id(), error = %err, "candidate rejected params");
					last_error = Some(err);
				}
			}
		}

		Err(match last_error {
			Some(err) => RouterError::Build(err),
			None => RouterError::InvalidRouteName(name.to_string()),
		})
	}

	/// Returns the route with the given id.
	pub fn get(&self, id: RouteId) -> Option<&CompiledRoute<C>> {
		self.routes.get(id.index())
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns whether the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Checks if any route carries the given name.
	pub fn has_name(&self, name: &str) -> bool {
		self.routes.iter().any(|r| r.name() == Some(name))
	}

	/// Iterates over the routes in table order.
	pub fn iter(&self) -> std::slice::Iter<'_, CompiledRoute<C>> {
		self.routes.iter()
	}
}

impl<'a, C> IntoIterator for &'a RouteTable<C> {
	type Item = &'a CompiledRoute<C>;
	type IntoIter = std::slice::Iter<'a, CompiledRoute<C>>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::PatternError;
	use crate::params;
	use rstest::{fixture, rstest};

	#[fixture]
	fn table() -> RouteTable<&'static str> {
		RouteTable::build(
			vec![
				RouteDefinition::component("/", "Home").name("home"),
				RouteDefinition::component("/objects/:objectId", "Objects"),
				RouteDefinition::component("/posts/:year/:slug", "Post").name("post"),
				RouteDefinition::component("/posts/:slug", "Post").name("post"),
				RouteDefinition::component("/*rest", "NotFound").name("not-found"),
			],
			PatternOptions::default(),
		)
		.unwrap()
	}

	#[rstest]
	fn test_build_assigns_ordinals(table: RouteTable<&'static str>) {
		let ids: Vec<usize> = table.iter().map(|r| r.id().index()).collect();
		assert_eq!(ids, vec![0, 1, 2, 3, 4]);
		assert_eq!(table.len(), 5);
		assert!(!table.is_empty());
	}

	#[rstest]
	fn test_build_fails_fast_on_malformed_pattern() {
		let result = RouteTable::build(
			vec![
				RouteDefinition::component("/", "Home"),
				RouteDefinition::component("/users/:", "Users"),
				RouteDefinition::component("/(bad)", "Bad"),
			],
			PatternOptions::default(),
		);

		assert_eq!(
			result.unwrap_err(),
			RouterError::Compile {
				index: 1,
				pattern: "/users/:".to_string(),
				source: PatternError::MissingName { index: 7 },
			}
		);
	}

	#[rstest]
	fn test_match_path_first_match_wins(table: RouteTable<&'static str>) {
		let m = table.match_path("/objects/42").unwrap();
		assert_eq!(m.route.id().index(), 1);
		assert_eq!(m.params, params! { "objectId" => "42" });

		let m = table.match_path("/unknown/page").unwrap();
		assert_eq!(m.route.name(), Some("not-found"));

		let m = table.match_path("/").unwrap();
		assert_eq!(m.route.name(), Some("home"));
	}

	#[rstest]
	fn test_match_path_none_without_catch_all() {
		let table = RouteTable::build(
			vec![RouteDefinition::component("/", "Home")],
			PatternOptions::default(),
		)
		.unwrap();

		assert!(table.match_path("/missing").is_none());
	}

	#[rstest]
	fn test_match_name_builds_path(table: RouteTable<&'static str>) {
		let m = table.match_name("home", &Params::new()).unwrap();
		assert_eq!(m.path, "/");
		assert_eq!(m.route.id().index(), 0);
	}

	#[rstest]
	fn test_match_name_tries_next_candidate(table: RouteTable<&'static str>) {
		// First "post" route needs year and slug; second only slug
		let m = table
			.match_name("post", &params! { "slug" => "hello" })
			.unwrap();
		assert_eq!(m.route.id().index(), 3);
		assert_eq!(m.path, "/posts/hello");

		let m = table
			.match_name("post", &params! { "year" => 2024, "slug" => "hello" })
			.unwrap();
		assert_eq!(m.route.id().index(), 2);
		assert_eq!(m.path, "/posts/2024/hello");
	}

	#[rstest]
	fn test_match_name_none_when_all_candidates_fail(table: RouteTable<&'static str>) {
		assert!(table.match_name("post", &Params::new()).is_none());
		assert!(table.match_name("nonexistent", &Params::new()).is_none());
	}

	#[rstest]
	fn test_reverse_errors(table: RouteTable<&'static str>) {
		assert_eq!(
			table.reverse("nonexistent", &Params::new()),
			Err(RouterError::InvalidRouteName("nonexistent".to_string()))
		);
		assert_eq!(
			table.reverse("post", &Params::new()),
			Err(RouterError::Build(BuildError::MissingParameter(
				"slug".to_string()
			)))
		);
	}

	#[rstest]
	fn test_has_name(table: RouteTable<&'static str>) {
		assert!(table.has_name("home"));
		assert!(table.has_name("not-found"));
		assert!(!table.has_name("objects"));
	}
}
