//! Link activation state.
//!
//! Navigation links highlight in two strengths: "active" when their target
//! resolves to the active route, and "exact" when their concrete path is the
//! current address. Route identity is compared by [`RouteId`](crate::RouteId),
//! so two structurally equal route definitions are still distinct routes.

use crate::history::{HistoryBackend, NavigationTarget};
use crate::navigator::Router;
use crate::state::NavigationState;
use crate::table::RouteTable;

/// Activation state of a link, computed per render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkState {
	/// The target resolves to the active route.
	pub is_active: bool,
	/// The target's path equals the current address.
	pub is_exact_match: bool,
}

/// Computes the activation state of a link to `target`.
///
/// `current_location` is the host's address including query string and
/// fragment. A path target is compared with it even when no route accepts the
/// path. A named target that cannot be built has no path, so it is neither
/// active nor exact.
pub fn compute_link_state<C>(
	table: &RouteTable<C>,
	state: &NavigationState,
	current_location: &str,
	target: &NavigationTarget,
) -> LinkState {
	match target {
		NavigationTarget::Path { path } => LinkState {
			is_active: table
				.match_path(path)
				.is_some_and(|m| state.is_active(m.route.id())),
			is_exact_match: path == current_location,
		},
		NavigationTarget::Named { name, params } => match table.match_name(name, params) {
			Some(m) => LinkState {
				is_active: state.is_active(m.route.id()),
				is_exact_match: m.path == current_location,
			},
			None => LinkState::default(),
		},
	}
}

impl<C, H: HistoryBackend> Router<C, H> {
	/// Computes the activation state of a link to `target` against the
	/// active route and the host's current address.
	pub fn link_state(&self, target: &NavigationTarget) -> LinkState {
		let location = self.history().location();
		self.state_signal()
			.with(|state| compute_link_state(self.table(), state, &location, target))
	}
}
