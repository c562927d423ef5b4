//! The current-route snapshot observed by renderers.

use crate::params::Params;
use crate::route::RouteId;

/// Lifecycle phase of a navigation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
	/// No route has been resolved yet; the null route is active.
	Uninitialized,
	/// A component route is active.
	Resolved,
}

/// The active route, path and params.
///
/// The three fields always come from the same resolution: the engine replaces
/// the whole value in one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
	active_route: Option<RouteId>,
	active_path: String,
	active_params: Params,
}

impl NavigationState {
	pub(crate) fn resolved(route: RouteId, path: impl Into<String>, params: Params) -> Self {
		Self {
			active_route: Some(route),
			active_path: path.into(),
			active_params: params,
		}
	}

	/// Returns the active route, or `None` while the null route is active.
	pub fn active_route(&self) -> Option<RouteId> {
		self.active_route
	}

	/// Returns the active path as navigated (fragment and query included).
	pub fn active_path(&self) -> &str {
		&self.active_path
	}

	/// Returns the active params.
	pub fn active_params(&self) -> &Params {
		&self.active_params
	}

	/// Returns the lifecycle phase.
	pub fn phase(&self) -> NavigationPhase {
		match self.active_route {
			Some(_) => NavigationPhase::Resolved,
			None => NavigationPhase::Uninitialized,
		}
	}

	/// Checks whether `route` is the active route.
	pub fn is_active(&self, route: RouteId) -> bool {
		self.active_route == Some(route)
	}
}
