//! Route definitions and their compiled form.

use crate::pattern::PathPattern;
use crate::view::RouteDescriptor;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Opaque metadata attached to a route.
pub type Meta = BTreeMap<String, serde_json::Value>;

/// Props passed to a rendered view component.
pub type Props = BTreeMap<String, serde_json::Value>;

/// Function computing props from the active route.
pub type PropsFn = Rc<dyn Fn(&RouteDescriptor) -> Props>;

/// Static or computed props for a component route.
#[derive(Clone)]
pub enum RouteProps {
	/// A fixed props map.
	Static(Props),
	/// Props computed from the current route on every render.
	Computed(PropsFn),
}

impl RouteProps {
	/// Resolves the props for the given route descriptor.
	pub fn resolve(&self, descriptor: &RouteDescriptor) -> Props {
		match self {
			Self::Static(props) => props.clone(),
			Self::Computed(f) => f(descriptor),
		}
	}
}

impl fmt::Debug for RouteProps {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Static(props) => f.debug_tuple("Static").field(props).finish(),
			Self::Computed(_) => f.write_str("Computed(..)"),
		}
	}
}

/// A route rendering a view component.
#[derive(Debug, Clone)]
pub struct ComponentRoute<C> {
	/// The component reference handed to the renderer.
	pub component: C,
	/// Props for the component.
	pub props: Option<RouteProps>,
	/// Per-route override of [`RouterOptions::route_prop`](crate::RouterOptions::route_prop).
	pub route_prop: Option<bool>,
	/// Per-route override of [`RouterOptions::params_to_props`](crate::RouterOptions::params_to_props).
	pub params_to_props: Option<bool>,
}

/// A route that sends the browser elsewhere with a full page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRoute {
	/// Redirect target URL.
	pub redirect: String,
}

/// What a route resolves to.
#[derive(Debug, Clone)]
pub enum RouteTarget<C> {
	/// Render a component.
	Component(ComponentRoute<C>),
	/// Redirect the browser.
	Redirect(RedirectRoute),
}

/// A single route definition, as supplied by the application.
///
/// # Example
///
/// ```
/// use wayfinder_router::RouteDefinition;
///
/// let routes = vec![
///     RouteDefinition::component("/", "Home").name("home"),
///     RouteDefinition::component("/objects{/:objectId}", "Objects").params_to_props(true),
///     RouteDefinition::redirect("/search", "https://duckduckgo.com").name("search"),
///     RouteDefinition::component("/*pathMatch", "NotFound").name("not-found").route_prop(true),
/// ];
/// assert_eq!(routes.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct RouteDefinition<C> {
	path: String,
	name: Option<String>,
	meta: Meta,
	target: RouteTarget<C>,
}

impl<C> RouteDefinition<C> {
	/// Creates a route rendering `component` for paths matching `path`.
	pub fn component(path: impl Into<String>, component: C) -> Self {
		Self {
			path: path.into(),
			name: None,
			meta: Meta::new(),
			target: RouteTarget::Component(ComponentRoute {
				component,
				props: None,
				route_prop: None,
				params_to_props: None,
			}),
		}
	}

	/// Creates a route redirecting to `target` for paths matching `path`.
	pub fn redirect(path: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			name: None,
			meta: Meta::new(),
			target: RouteTarget::Redirect(RedirectRoute {
				redirect: target.into(),
			}),
		}
	}

	/// Sets the route name used for name-based navigation.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Adds a metadata entry.
	pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.meta.insert(key.into(), value.into());
		self
	}

	/// Sets static props. No effect on redirect routes.
	pub fn props(mut self, props: Props) -> Self {
		if let RouteTarget::Component(route) = &mut self.target {
			route.props = Some(RouteProps::Static(props));
		}
		self
	}

	/// Sets props computed from the current route. No effect on redirect routes.
	pub fn props_fn<F>(mut self, f: F) -> Self
	where
		F: Fn(&RouteDescriptor) -> Props + 'static,
	{
		if let RouteTarget::Component(route) = &mut self.target {
			route.props = Some(RouteProps::Computed(Rc::new(f)));
		}
		self
	}

	/// Overrides whether the current-route descriptor is injected as the `route` prop.
	pub fn route_prop(mut self, enabled: bool) -> Self {
		if let RouteTarget::Component(route) = &mut self.target {
			route.route_prop = Some(enabled);
		}
		self
	}

	/// Overrides whether matched params are spread as individual props.
	pub fn params_to_props(mut self, enabled: bool) -> Self {
		if let RouteTarget::Component(route) = &mut self.target {
			route.params_to_props = Some(enabled);
		}
		self
	}

	/// Returns the path pattern string.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the route name.
	pub fn route_name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the route metadata.
	pub fn route_meta(&self) -> &Meta {
		&self.meta
	}

	/// Returns the route target.
	pub fn target(&self) -> &RouteTarget<C> {
		&self.target
	}
}

/// Stable ordinal identity of a compiled route within its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(usize);

impl RouteId {
	/// Returns the zero-based position of the route in its table.
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for RouteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A route definition compiled for matching and path building.
///
/// Created once when the table is built and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CompiledRoute<C> {
	id: RouteId,
	pattern: PathPattern,
	definition: RouteDefinition<C>,
}

impl<C> CompiledRoute<C> {
	pub(crate) fn new(index: usize, pattern: PathPattern, definition: RouteDefinition<C>) -> Self {
		Self {
			id: RouteId(index),
			pattern,
			definition,
		}
	}

	/// Returns the route's ordinal identity.
	pub fn id(&self) -> RouteId {
		self.id
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the original definition.
	pub fn definition(&self) -> &RouteDefinition<C> {
		&self.definition
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.definition.route_name()
	}

	/// Returns the path pattern string.
	pub fn path(&self) -> &str {
		self.definition.path()
	}

	/// Returns the route metadata.
	pub fn meta(&self) -> &Meta {
		self.definition.route_meta()
	}

	/// Returns the route target.
	pub fn target(&self) -> &RouteTarget<C> {
		self.definition.target()
	}

	/// Returns whether this route renders a component.
	pub fn is_component(&self) -> bool {
		matches!(self.target(), RouteTarget::Component(_))
	}

	/// Returns whether this route redirects.
	pub fn is_redirect(&self) -> bool {
		matches!(self.target(), RouteTarget::Redirect(_))
	}
}
