//! # Wayfinder
//!
//! Client-side routing for single-page applications.
//!
//! Wayfinder maps URL paths to view components, keeps the host's session
//! history in sync with the active route, and exposes the active route as an
//! observable snapshot. Rendering is left to the application: it subscribes to
//! the router state and swaps the displayed component.
//!
//! ## Quick Start
//!
//! ```
//! use wayfinder::prelude::*;
//!
//! let router = Router::new(
//!     vec![
//!         RouteDefinition::component("/", "Home").name("home"),
//!         RouteDefinition::component("/objects/:objectId", "Object").params_to_props(true),
//!         RouteDefinition::component("/*rest", "NotFound").name("not-found"),
//!     ],
//!     MemoryHistory::new("/"),
//! )
//! .unwrap();
//!
//! router.state_signal().subscribe(|state| {
//!     println!("now at {}", state.active_path());
//! });
//!
//! assert!(router.navigate("/objects/42"));
//! let view = router.resolve_view().unwrap();
//! assert_eq!(view.component, &"Object");
//! assert_eq!(view.props["objectId"], serde_json::json!("42"));
//! ```
//!
//! In the browser, bind the router to `BrowserHistory` and install the
//! back/forward listener with `setup_history_listener`.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use wayfinder_router as router;

pub use wayfinder_router::*;

/// Commonly used types.
pub mod prelude {
	pub use wayfinder_router::{
		HistoryBackend, LinkState, MemoryHistory, NavigationOutcome, NavigationPhase,
		NavigationState, NavigationTarget, ParamValue, Params, PopStateEvent, RouteDefinition,
		RouteDescriptor, Router, RouterError, RouterOptions, Signal, params,
	};

	#[cfg(target_arch = "wasm32")]
	pub use wayfinder_router::{BrowserHistory, setup_history_listener};
}
