//! The navigation engine.
//!
//! [`Router`] owns the compiled route table, the observable
//! [`NavigationState`] and the host history. Every transition goes through
//! [`Router::navigate_by_path`] or [`Router::navigate_by_name`]; dispatch,
//! replace and back/forward replay are thin layers over those two.
//!
//! History is written before the state changes, so a failed write leaves the
//! previous route active.

use crate::error::{HistoryError, RouterError};
use crate::history::{HistoryBackend, MemoryHistory, NavigationTarget};
use crate::options::RouterOptions;
use crate::params::Params;
use crate::pattern;
use crate::reactive::Signal;
use crate::route::{CompiledRoute, RouteDefinition, RouteTarget};
use crate::state::{NavigationPhase, NavigationState};
use crate::table::{NameMatch, PathMatch, RouteTable};
use crate::view::{ResolvedView, RouteDescriptor, resolve_props};

/// How a resolved navigation is recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationType {
	/// Push a new entry.
	Push,
	/// Replace the current entry.
	Replace,
	/// Leave history alone; the host already moved.
	Pop,
}

impl NavigationType {
	fn from_push_flag(should_push_history: bool) -> Self {
		if should_push_history { Self::Push } else { Self::Pop }
	}
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// A component route became active.
	Navigated,
	/// The target is already the current history entry; nothing changed.
	Unchanged,
	/// A redirect route matched; the host is navigating away.
	Redirected,
	/// No route matched; nothing changed.
	NoMatch,
	/// The history entry could not be written; nothing changed.
	HistoryFailed(HistoryError),
}

impl NavigationOutcome {
	/// Returns whether the request was honoured.
	///
	/// `Unchanged` counts as success: the requested route is already active.
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Navigated | Self::Unchanged | Self::Redirected)
	}
}

/// Client-side router bound to a history backend.
///
/// `C` is the component reference handed to the renderer; `H` is the host
/// history, [`MemoryHistory`] unless a browser backend is supplied.
///
/// # Example
///
/// ```
/// use wayfinder_router::{MemoryHistory, NavigationTarget, RouteDefinition, Router, params};
///
/// let router = Router::new(
///     vec![
///         RouteDefinition::component("/", "Home").name("home"),
///         RouteDefinition::component("/objects/:objectId", "Objects").name("objects"),
///         RouteDefinition::component("/*rest", "NotFound").name("not-found"),
///     ],
///     MemoryHistory::new("/"),
/// )
/// .unwrap();
///
/// assert!(router.navigate("/objects/42"));
/// assert_eq!(router.state().active_params(), &params! { "objectId" => "42" });
///
/// assert!(router.navigate(NavigationTarget::name("home")));
/// assert_eq!(router.state().active_path(), "/");
/// ```
#[derive(Debug)]
pub struct Router<C, H = MemoryHistory> {
	table: RouteTable<C>,
	options: RouterOptions,
	state: Signal<NavigationState>,
	history: H,
}

impl<C, H: HistoryBackend> Router<C, H> {
	/// Builds a router with default options and resolves the host's current path.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Compile`] if any route pattern is malformed.
	pub fn new(definitions: Vec<RouteDefinition<C>>, history: H) -> Result<Self, RouterError> {
		Self::with_options(definitions, RouterOptions::default(), history)
	}

	/// Builds a router with the given options and resolves the host's current path.
	///
	/// The initial resolution replaces the current history entry, so it
	/// carries a `{path}` payload without adding an entry.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Compile`] if any route pattern is malformed.
	pub fn with_options(
		definitions: Vec<RouteDefinition<C>>,
		options: RouterOptions,
		history: H,
	) -> Result<Self, RouterError> {
		let table = RouteTable::build(definitions, options.pattern_options())?;
		tracing::info!(routes = table.len(), "router initialized");

		let router = Self {
			table,
			options,
			state: Signal::new(NavigationState::default()),
			history,
		};
		router.resolve_initial();
		Ok(router)
	}

	fn resolve_initial(&self) {
		let location = self.history.location();
		let path = pattern::path_portion(&location);

		// The entry keeps its full URL; only the path is resolved
		match self.resolve_path(path, &location, NavigationType::Replace) {
			NavigationOutcome::HistoryFailed(_) => {
				// Settle the state even if the entry cannot be annotated
				self.resolve_path(path, &location, NavigationType::Pop);
			}
			NavigationOutcome::NoMatch => {
				tracing::debug!(path, "initial path matched no route");
			}
			_ => {}
		}
	}

	/// Resolves `path` and makes its route active.
	///
	/// Pushes a `{path}` history entry when `should_push_history` is set,
	/// unless that entry is already the current one, which reports
	/// [`NavigationOutcome::Unchanged`]. Back/forward replay passes `false`.
	pub fn navigate_by_path(&self, path: &str, should_push_history: bool) -> NavigationOutcome {
		self.resolve_path(path, path, NavigationType::from_push_flag(should_push_history))
	}

	/// Resolves the route named `name` with `params` and makes it active.
	///
	/// Pushes a `{name, params}` history entry when `should_push_history` is
	/// set, with the same duplicate-entry check as [`Router::navigate_by_path`].
	pub fn navigate_by_name(
		&self,
		name: &str,
		params: Params,
		should_push_history: bool,
	) -> NavigationOutcome {
		self.resolve_name(name, params, NavigationType::from_push_flag(should_push_history))
	}

	/// Navigates to `target`, pushing a history entry.
	///
	/// A target equal to the current history entry is a no-op reported as
	/// [`NavigationOutcome::Unchanged`].
	pub fn dispatch(&self, target: &NavigationTarget) -> NavigationOutcome {
		tracing::debug!(%target, "dispatching navigation");
		self.resolve_target(target, NavigationType::Push)
	}

	/// Navigates to `target`, returning whether it succeeded.
	///
	/// Failure means no route matched or history could not be written; the
	/// state is unchanged in both cases.
	pub fn navigate(&self, target: impl Into<NavigationTarget>) -> bool {
		self.dispatch(&target.into()).is_success()
	}

	/// Navigates to `target`, replacing the current history entry.
	pub fn replace(&self, target: &NavigationTarget) -> NavigationOutcome {
		self.resolve_target(target, NavigationType::Replace)
	}

	fn resolve_target(&self, target: &NavigationTarget, nav_type: NavigationType) -> NavigationOutcome {
		match target {
			NavigationTarget::Path { path } => self.resolve_path(path, path, nav_type),
			NavigationTarget::Named { name, params } => {
				self.resolve_name(name, params.clone(), nav_type)
			}
		}
	}

	fn resolve_path(&self, path: &str, url: &str, nav_type: NavigationType) -> NavigationOutcome {
		let Some(PathMatch { route, params }) = self.table.match_path(path) else {
			tracing::debug!(path, "no route matches path");
			return NavigationOutcome::NoMatch;
		};

		if let Some(outcome) = self.follow_redirect(route, path) {
			return outcome;
		}

		let entry = NavigationTarget::path(path);
		if self.is_duplicate_push(nav_type, &entry) {
			return NavigationOutcome::Unchanged;
		}
		if let Err(err) = self.record(nav_type, &entry, url) {
			return NavigationOutcome::HistoryFailed(err);
		}

		self.state
			.set(NavigationState::resolved(route.id(), path, params));

		if let Some(fragment) = pattern::fragment(path) {
			self.history.scroll_to_fragment(fragment);
		}

		tracing::debug!(path, route = %route.id(), "navigated");
		NavigationOutcome::Navigated
	}

	fn resolve_name(&self, name: &str, params: Params, nav_type: NavigationType) -> NavigationOutcome {
		let Some(NameMatch { route, path }) = self.table.match_name(name, &params) else {
			tracing::debug!(name, "no route accepts name and params");
			return NavigationOutcome::NoMatch;
		};

		if let Some(outcome) = self.follow_redirect(route, &path) {
			return outcome;
		}

		let entry = NavigationTarget::named(name, params.clone());
		if self.is_duplicate_push(nav_type, &entry) {
			return NavigationOutcome::Unchanged;
		}
		if let Err(err) = self.record(nav_type, &entry, &path) {
			return NavigationOutcome::HistoryFailed(err);
		}

		self.state
			.set(NavigationState::resolved(route.id(), path.as_str(), params));

		tracing::debug!(name, path = %path, route = %route.id(), "navigated");
		NavigationOutcome::Navigated
	}

	/// A push of the current entry would duplicate it in the stack.
	fn is_duplicate_push(&self, nav_type: NavigationType, entry: &NavigationTarget) -> bool {
		if nav_type != NavigationType::Push {
			return false;
		}
		let duplicate = self.history.current_state().as_ref() == Some(entry);
		if duplicate {
			tracing::debug!(%entry, "target is the current history entry");
		}
		duplicate
	}

	fn follow_redirect(&self, route: &CompiledRoute<C>, from: &str) -> Option<NavigationOutcome> {
		match route.target() {
			RouteTarget::Redirect(redirect) => {
				tracing::info!(from, to = %redirect.redirect, "redirecting");
				self.history.redirect(&redirect.redirect);
				Some(NavigationOutcome::Redirected)
			}
			RouteTarget::Component(_) => None,
		}
	}

	fn record(
		&self,
		nav_type: NavigationType,
		entry: &NavigationTarget,
		url: &str,
	) -> Result<(), HistoryError> {
		let result = match nav_type {
			NavigationType::Push => self.history.push_state(entry, url),
			NavigationType::Replace => self.history.replace_state(entry, url),
			NavigationType::Pop => Ok(()),
		};
		if let Err(err) = &result {
			tracing::warn!(%entry, error = %err, "failed to write history entry");
		}
		result
	}

	/// Returns a snapshot of the navigation state.
	pub fn state(&self) -> NavigationState {
		self.state.get()
	}

	/// Returns the observable navigation state.
	///
	/// Renderers subscribe here and re-render from the snapshot they receive.
	pub fn state_signal(&self) -> &Signal<NavigationState> {
		&self.state
	}

	/// Returns the lifecycle phase.
	pub fn phase(&self) -> NavigationPhase {
		self.state.with(NavigationState::phase)
	}

	/// Returns the active route, `None` before any route resolved.
	pub fn active_route(&self) -> Option<&CompiledRoute<C>> {
		self.state
			.with(NavigationState::active_route)
			.and_then(|id| self.table.get(id))
	}

	/// Returns the descriptor of the active route with the active params.
	pub fn current_route_descriptor(&self) -> Option<RouteDescriptor> {
		let route = self.active_route()?;
		Some(self.state.with(|state| RouteDescriptor::new(route, state.active_params())))
	}

	/// Returns the active component and its merged props.
	pub fn resolve_view(&self) -> Option<ResolvedView<'_, C>> {
		let route = self.active_route()?;
		let RouteTarget::Component(component) = route.target() else {
			return None;
		};
		let descriptor = self.current_route_descriptor()?;
		Some(ResolvedView {
			component: &component.component,
			props: resolve_props(component, &descriptor, &self.options),
		})
	}

	/// Matches a path without navigating.
	pub fn match_path(&self, path: &str) -> Option<PathMatch<'_, C>> {
		self.table.match_path(path)
	}

	/// Matches a route name and params without navigating.
	pub fn match_name(&self, name: &str, params: &Params) -> Option<NameMatch<'_, C>> {
		self.table.match_name(name, params)
	}

	/// Builds the path of a named route.
	///
	/// # Errors
	///
	/// See [`RouteTable::reverse`].
	pub fn reverse(&self, name: &str, params: &Params) -> Result<String, RouterError> {
		self.table.reverse(name, params)
	}

	/// Returns the concrete path a target navigates to, for use as a link `href`.
	pub fn href_for(&self, target: &NavigationTarget) -> Option<String> {
		match target {
			NavigationTarget::Path { path } => Some(path.clone()),
			NavigationTarget::Named { name, params } => {
				self.table.match_name(name, params).map(|m| m.path)
			}
		}
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.table.len()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.table.has_name(name)
	}

	/// Returns the router options.
	pub fn options(&self) -> &RouterOptions {
		&self.options
	}

	/// Returns the history backend.
	pub fn history(&self) -> &H {
		&self.history
	}

	/// Returns the route table.
	pub fn table(&self) -> &RouteTable<C> {
		&self.table
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::params;
	use rstest::{fixture, rstest};
	use serde_json::json;

	fn routes() -> Vec<RouteDefinition<&'static str>> {
		vec![
			RouteDefinition::component("/", "Home").name("home"),
			RouteDefinition::component("/about", "About").name("about"),
			RouteDefinition::component("/users/:id", "User").name("user"),
			RouteDefinition::redirect("/search", "https://duckduckgo.com").name("search"),
		]
	}

	#[fixture]
	fn router() -> Router<&'static str> {
		Router::new(routes(), MemoryHistory::new("/")).unwrap()
	}

	#[rstest]
	fn test_initial_resolution_replaces_entry(router: Router<&'static str>) {
		assert_eq!(router.phase(), NavigationPhase::Resolved);
		assert_eq!(router.active_route().unwrap().name(), Some("home"));
		assert_eq!(router.history().len(), 1);
		assert_eq!(router.history().current_entry().state, Some(json!({ "path": "/" })));
	}

	#[rstest]
	fn test_initial_resolution_ignores_query_and_fragment() {
		let router = Router::new(routes(), MemoryHistory::new("/about?tab=1#team")).unwrap();

		assert_eq!(router.state().active_path(), "/about");
		assert!(router.history().scroll_requests().is_empty());
		assert_eq!(router.history().location(), "/about?tab=1#team");
		assert_eq!(
			router.history().current_entry().state,
			Some(json!({ "path": "/about" }))
		);
	}

	#[rstest]
	fn test_initial_unmatched_path_stays_uninitialized() {
		let router = Router::new(routes(), MemoryHistory::new("/missing")).unwrap();

		assert_eq!(router.phase(), NavigationPhase::Uninitialized);
		assert!(router.active_route().is_none());
		assert!(router.resolve_view().is_none());
		assert_eq!(router.history().current_entry().state, None);
	}

	#[rstest]
	fn test_initial_resolution_survives_read_only_history() {
		let history = MemoryHistory::new("/about");
		history.set_read_only(true);

		let router = Router::new(routes(), history).unwrap();

		assert_eq!(router.active_route().unwrap().name(), Some("about"));
	}

	#[rstest]
	fn test_compile_error_aborts_construction() {
		let result = Router::new(
			vec![RouteDefinition::component("/users/:", "Users")],
			MemoryHistory::default(),
		);
		assert!(matches!(result, Err(RouterError::Compile { index: 0, .. })));
	}

	#[rstest]
	fn test_navigate_by_path_pushes(router: Router<&'static str>) {
		let outcome = router.navigate_by_path("/users/5", true);

		assert_eq!(outcome, NavigationOutcome::Navigated);
		assert_eq!(router.state().active_path(), "/users/5");
		assert_eq!(router.state().active_params(), &params! { "id" => "5" });
		assert_eq!(router.history().len(), 2);
		assert_eq!(router.history().location(), "/users/5");
	}

	#[rstest]
	fn test_navigate_by_path_without_push(router: Router<&'static str>) {
		let outcome = router.navigate_by_path("/about", false);

		assert_eq!(outcome, NavigationOutcome::Navigated);
		assert_eq!(router.active_route().unwrap().name(), Some("about"));
		assert_eq!(router.history().len(), 1);
	}

	#[rstest]
	fn test_navigate_by_path_scrolls_to_fragment(router: Router<&'static str>) {
		router.navigate_by_path("/about#team", true);

		assert_eq!(router.state().active_path(), "/about#team");
		assert_eq!(router.history().scroll_requests(), vec!["team"]);
	}

	#[rstest]
	fn test_no_match_leaves_state(router: Router<&'static str>) {
		let before = router.state();

		assert_eq!(router.navigate_by_path("/nowhere", true), NavigationOutcome::NoMatch);
		assert!(!router.navigate("/nowhere"));
		assert_eq!(router.state(), before);
		assert_eq!(router.history().len(), 1);
	}

	#[rstest]
	fn test_redirect_does_not_touch_state(router: Router<&'static str>) {
		let before = router.state();

		assert_eq!(router.navigate_by_path("/search", true), NavigationOutcome::Redirected);
		assert_eq!(
			router.navigate_by_name("search", Params::new(), true),
			NavigationOutcome::Redirected
		);

		assert_eq!(router.state(), before);
		assert_eq!(
			router.history().redirects(),
			vec!["https://duckduckgo.com", "https://duckduckgo.com"]
		);
		assert_eq!(router.history().len(), 1);
	}

	#[rstest]
	fn test_navigate_by_name_records_params(router: Router<&'static str>) {
		let outcome = router.navigate_by_name("user", params! { "id" => 9 }, true);

		assert_eq!(outcome, NavigationOutcome::Navigated);
		assert_eq!(router.state().active_path(), "/users/9");
		assert_eq!(router.state().active_params(), &params! { "id" => 9 });
		assert_eq!(
			router.history().current_entry().state,
			Some(json!({ "name": "user", "params": { "id": 9 } }))
		);
	}

	#[rstest]
	fn test_dispatch_dedups_current_entry(router: Router<&'static str>) {
		let target = NavigationTarget::name("about");

		assert_eq!(router.dispatch(&target), NavigationOutcome::Navigated);
		assert_eq!(router.dispatch(&target), NavigationOutcome::Unchanged);
		assert_eq!(router.history().len(), 2);

		// The initial entry is {path: "/"}
		router.history().back();
		assert_eq!(router.dispatch(&NavigationTarget::path("/")), NavigationOutcome::Unchanged);
	}

	#[rstest]
	fn test_navigate_by_name_twice_pushes_once(router: Router<&'static str>) {
		let first = router.navigate_by_name("about", Params::new(), true);
		let second = router.navigate_by_name("about", Params::new(), true);

		assert_eq!(first, NavigationOutcome::Navigated);
		assert_eq!(second, NavigationOutcome::Unchanged);
		assert_eq!(router.history().len(), 2);
	}

	#[rstest]
	fn test_navigate_by_path_twice_pushes_once(router: Router<&'static str>) {
		assert_eq!(router.navigate_by_path("/about", true), NavigationOutcome::Navigated);
		assert_eq!(router.navigate_by_path("/about", true), NavigationOutcome::Unchanged);
		assert_eq!(router.history().len(), 2);
		assert_eq!(router.state().active_path(), "/about");
	}

	#[rstest]
	fn test_replay_of_current_entry_still_resolves(router: Router<&'static str>) {
		router.navigate_by_name("about", Params::new(), true);
		router.history().back();

		// The host already moved to {path: "/"}; replaying it must not be skipped
		assert_eq!(router.navigate_by_path("/", false), NavigationOutcome::Navigated);
		assert_eq!(router.active_route().unwrap().name(), Some("home"));
	}

	#[rstest]
	fn test_history_failure_leaves_state(router: Router<&'static str>) {
		router.history().set_read_only(true);
		let before = router.state();

		let outcome = router.dispatch(&NavigationTarget::path("/about"));

		assert!(matches!(outcome, NavigationOutcome::HistoryFailed(_)));
		assert!(!outcome.is_success());
		assert_eq!(router.state(), before);
	}

	#[rstest]
	fn test_replace_keeps_history_length(router: Router<&'static str>) {
		let outcome = router.replace(&NavigationTarget::path("/about"));

		assert_eq!(outcome, NavigationOutcome::Navigated);
		assert_eq!(router.history().len(), 1);
		assert_eq!(router.history().location(), "/about");
	}

	#[rstest]
	fn test_state_signal_notifies_once_per_transition(router: Router<&'static str>) {
		let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
		let sink = std::rc::Rc::clone(&seen);
		router
			.state_signal()
			.subscribe(move |state: &NavigationState| sink.borrow_mut().push(state.active_path().to_string()));

		router.navigate("/about");
		router.navigate("/about");
		router.navigate("/nowhere");
		router.navigate(NavigationTarget::named("user", params! { "id" => 1 }));

		assert_eq!(*seen.borrow(), vec!["/about", "/users/1"]);
	}

	#[rstest]
	fn test_href_for(router: Router<&'static str>) {
		assert_eq!(
			router.href_for(&NavigationTarget::named("user", params! { "id" => "a b" })),
			Some("/users/a%20b".to_string())
		);
		assert_eq!(
			router.href_for(&NavigationTarget::path("/anything")),
			Some("/anything".to_string())
		);
		assert_eq!(router.href_for(&NavigationTarget::name("user")), None);
	}

	#[rstest]
	fn test_read_api(router: Router<&'static str>) {
		assert_eq!(router.route_count(), 4);
		assert!(router.has_route("search"));
		assert!(!router.has_route("missing"));
		assert_eq!(router.reverse("user", &params! { "id" => 3 }).unwrap(), "/users/3");
		assert!(router.match_path("/users/3").is_some());
		assert!(router.match_name("user", &Params::new()).is_none());
		assert_eq!(router.options(), &RouterOptions::default());
		assert_eq!(router.table().len(), 4);
	}

	#[rstest]
	#[case(NavigationOutcome::Navigated, true)]
	#[case(NavigationOutcome::Unchanged, true)]
	#[case(NavigationOutcome::Redirected, true)]
	#[case(NavigationOutcome::NoMatch, false)]
	#[case(NavigationOutcome::HistoryFailed(HistoryError::Unavailable("x".into())), false)]
	fn test_outcome_success(#[case] outcome: NavigationOutcome, #[case] expected: bool) {
		assert_eq!(outcome.is_success(), expected);
	}
}
