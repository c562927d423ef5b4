//! Wayfinder Router - client-side route matching and navigation state
//!
//! Maps URL paths to view components for single-page applications, keeps the
//! host's session history in sync with the active route, and exposes the
//! active route as an observable snapshot that renderers re-render from.
//!
//! ## Features
//!
//! - **Path patterns**: `:param`, `*wildcard`, `{optional}` groups, compiled
//!   eagerly so malformed patterns fail at construction
//! - **First-match-wins tables**: ordered routes, name-based navigation with
//!   fallback across routes sharing a name
//! - **History synchronization**: push on dispatch, replay without push on
//!   back/forward, deduplication of repeated dispatches
//! - **Reactive state**: one `Signal` carrying route, path and params together
//! - **Browser and memory backends**: `web-sys` on wasm32, an in-memory stack
//!   everywhere else
//!
//! ## Architecture
//!
//! - [`pattern`]: path pattern compiler (matcher and builder)
//! - [`table`]: compiled route table
//! - [`navigator`]: the navigation engine ([`Router`])
//! - [`bridge`]: back/forward replay
//! - [`history`]: host history abstraction
//! - [`link`]: link activation state
//! - [`view`]: renderer-facing descriptor and props
//!
//! ## Example
//!
//! ```
//! use wayfinder_router::{MemoryHistory, NavigationTarget, RouteDefinition, Router};
//!
//! let router = Router::new(
//!     vec![
//!         RouteDefinition::component("/", "Home").name("home"),
//!         RouteDefinition::component("/contact", "Contact").name("contact"),
//!         RouteDefinition::component("/*rest", "NotFound").name("not-found"),
//!     ],
//!     MemoryHistory::new("/"),
//! )
//! .unwrap();
//!
//! assert!(router.navigate(NavigationTarget::name("contact")));
//! assert_eq!(router.resolve_view().unwrap().component, &"Contact");
//!
//! // Browser back button
//! let event = router.history().back().unwrap();
//! router.handle_pop_state(&event);
//! assert_eq!(router.state().active_path(), "/");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bridge;
pub mod error;
pub mod history;
pub mod link;
pub mod navigator;
pub mod options;
pub mod params;
pub mod pattern;
pub mod reactive;
pub mod route;
pub mod state;
pub mod table;
pub mod view;

#[cfg(target_arch = "wasm32")]
#[cfg_attr(docsrs, doc(cfg(target_arch = "wasm32")))]
pub use bridge::setup_history_listener;
pub use error::{BuildError, HistoryError, PatternError, RouterError};
#[cfg(target_arch = "wasm32")]
#[cfg_attr(docsrs, doc(cfg(target_arch = "wasm32")))]
pub use history::BrowserHistory;
pub use history::{
	HistoryBackend, HistoryEntry, HistoryState, MemoryHistory, NavigationTarget, PopStateEvent,
};
pub use link::{LinkState, compute_link_state};
pub use navigator::{NavigationOutcome, Router};
pub use options::RouterOptions;
pub use params::{ParamValue, Params};
pub use pattern::{PathPattern, PatternOptions};
pub use reactive::{Signal, SubscriptionId};
pub use route::{
	CompiledRoute, ComponentRoute, Meta, Props, PropsFn, RedirectRoute, RouteDefinition, RouteId,
	RouteProps, RouteTarget,
};
pub use state::{NavigationPhase, NavigationState};
pub use table::{NameMatch, PathMatch, RouteTable};
pub use view::{ROUTE_PROP_KEY, ResolvedView, RouteDescriptor};
