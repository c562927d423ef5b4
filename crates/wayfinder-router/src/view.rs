//! Renderer-facing view of the active route.

use crate::options::RouterOptions;
use crate::params::Params;
use crate::route::{ComponentRoute, CompiledRoute, Meta, Props};
use serde::Serialize;

/// Prop key under which the route descriptor is injected.
pub const ROUTE_PROP_KEY: &str = "route";

/// The current-route descriptor handed to views.
///
/// `path` is the route's pattern, not the concrete path; the concrete path is
/// available from [`NavigationState::active_path`](crate::NavigationState::active_path).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteDescriptor {
	/// Route name.
	pub name: Option<String>,
	/// Route pattern.
	pub path: String,
	/// Route metadata.
	pub meta: Meta,
	/// Active params.
	pub params: Params,
}

impl RouteDescriptor {
	/// Describes `route` with the given active params.
	pub fn new<C>(route: &CompiledRoute<C>, params: &Params) -> Self {
		Self {
			name: route.name().map(str::to_string),
			path: route.path().to_string(),
			meta: route.meta().clone(),
			params: params.clone(),
		}
	}

	/// Converts the descriptor to a JSON value for use as a prop.
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
	}
}

/// The component to render and its fully merged props.
#[derive(Debug)]
pub struct ResolvedView<'a, C> {
	/// The active route's component.
	pub component: &'a C,
	/// Props for the component.
	pub props: Props,
}

/// Merges the props for a component route.
///
/// Later sources win: route props first, then spread params, then the
/// descriptor under [`ROUTE_PROP_KEY`].
pub(crate) fn resolve_props<C>(
	route: &ComponentRoute<C>,
	descriptor: &RouteDescriptor,
	options: &RouterOptions,
) -> Props {
	let mut props = route
		.props
		.as_ref()
		.map(|p| p.resolve(descriptor))
		.unwrap_or_default();

	if route.params_to_props.unwrap_or(options.params_to_props) {
		props.extend(
			descriptor
				.params
				.iter()
				.map(|(key, value)| (key.clone(), value.to_json())),
		);
	}

	if route.route_prop.unwrap_or(options.route_prop) {
		props.insert(ROUTE_PROP_KEY.to_string(), descriptor.to_json());
	}

	props
}
