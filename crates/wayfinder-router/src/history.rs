//! Host history abstraction.
//!
//! The engine talks to the host's session history through [`HistoryBackend`].
//! [`MemoryHistory`] keeps the stack in memory and is used off-browser and in
//! tests; `BrowserHistory` (wasm32 only) drives `window.history`.
//!
//! Entry payloads are stored as JSON, either `{"path": ...}` or
//! `{"name": ..., "params": {...}}`. Entries written by other code may carry
//! anything, so payloads are decoded leniently.

use crate::error::HistoryError;
use crate::params::Params;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

/// A navigation request, and the payload stored in each history entry.
///
/// # Example
///
/// ```
/// use wayfinder_router::{NavigationTarget, params};
///
/// let by_path = NavigationTarget::path("/contact");
/// assert_eq!(serde_json::to_string(&by_path).unwrap(), r#"{"path":"/contact"}"#);
///
/// let by_name = NavigationTarget::named("user", params! { "id" => 7 });
/// assert_eq!(
///     serde_json::to_string(&by_name).unwrap(),
///     r#"{"name":"user","params":{"id":7}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavigationTarget {
	/// Navigate to a named route, building its path from `params`.
	Named {
		/// Route name.
		name: String,
		/// Route params.
		#[serde(default)]
		params: Params,
	},
	/// Navigate to a concrete path.
	Path {
		/// Path, optionally with query string and fragment.
		path: String,
	},
}

/// History entry payload.
pub type HistoryState = NavigationTarget;

impl NavigationTarget {
	/// Creates a path target.
	pub fn path(path: impl Into<String>) -> Self {
		Self::Path { path: path.into() }
	}

	/// Creates a named target.
	pub fn named(name: impl Into<String>, params: Params) -> Self {
		Self::Named {
			name: name.into(),
			params,
		}
	}

	/// Creates a named target without params.
	pub fn name(name: impl Into<String>) -> Self {
		Self::named(name, Params::new())
	}

	/// Decodes a raw history payload.
	///
	/// Returns `None` for `null` and for payloads not written by a router.
	pub fn from_json(value: &serde_json::Value) -> Option<Self> {
		if value.is_null() {
			return None;
		}
		Self::deserialize(value).ok()
	}

	/// Encodes the target as a raw history payload.
	pub fn to_json(&self) -> Result<serde_json::Value, HistoryError> {
		Ok(serde_json::to_value(self)?)
	}
}

impl fmt::Display for NavigationTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Path { path } => f.write_str(path),
			Self::Named { name, params } if params.is_empty() => write!(f, "{}", name),
			Self::Named { name, params } => {
				write!(f, "{}(", name)?;
				for (i, (key, value)) in params.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}={}", key, value)?;
				}
				f.write_str(")")
			}
		}
	}
}

impl From<&str> for NavigationTarget {
	fn from(path: &str) -> Self {
		Self::path(path)
	}
}

impl From<String> for NavigationTarget {
	fn from(path: String) -> Self {
		Self::path(path)
	}
}

/// A back/forward notification from the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopStateEvent {
	/// Raw payload of the restored entry, `None` if the entry has none.
	pub state: Option<serde_json::Value>,
}

impl PopStateEvent {
	/// Creates an event carrying the given raw payload.
	pub fn new(state: Option<serde_json::Value>) -> Self {
		Self { state }
	}

	/// Creates an event for an entry written by a router.
	pub fn from_target(target: &NavigationTarget) -> Result<Self, HistoryError> {
		Ok(Self::new(Some(target.to_json()?)))
	}

	/// Decodes the payload, `None` when absent or not a navigation target.
	pub fn target(&self) -> Option<NavigationTarget> {
		self.state.as_ref().and_then(NavigationTarget::from_json)
	}
}

/// The host's session history.
///
/// Methods take `&self`: a backend is owned by a router that is shared with
/// event listeners, so implementations use interior mutability.
pub trait HistoryBackend {
	/// Returns the current address: path, query string and fragment.
	fn location(&self) -> String;

	/// Returns the current entry's payload, if it is a navigation target.
	fn current_state(&self) -> Option<HistoryState>;

	/// Pushes a new entry.
	fn push_state(&self, state: &HistoryState, url: &str) -> Result<(), HistoryError>;

	/// Replaces the current entry.
	fn replace_state(&self, state: &HistoryState, url: &str) -> Result<(), HistoryError>;

	/// Performs a full page navigation to `url`.
	fn redirect(&self, url: &str);

	/// Scrolls the element with id `fragment`, or failing that the
	/// `<a name="fragment">` anchor, into view.
	fn scroll_to_fragment(&self, fragment: &str);
}

/// One entry of a [`MemoryHistory`] stack.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
	/// Entry URL.
	pub url: String,
	/// Raw entry payload.
	pub state: Option<serde_json::Value>,
}

#[derive(Debug)]
struct MemoryStack {
	entries: Vec<HistoryEntry>,
	index: usize,
	redirects: Vec<String>,
	scrolls: Vec<String>,
	read_only: bool,
}

impl MemoryStack {
	fn current(&self) -> &HistoryEntry {
		&self.entries[self.index]
	}

	fn check_writable(&self) -> Result<(), HistoryError> {
		if self.read_only {
			return Err(HistoryError::Operation("history is read-only".to_string()));
		}
		Ok(())
	}
}

/// An in-memory history stack.
///
/// Behaves like the browser's: pushing drops forward entries, and moving
/// through the stack yields the [`PopStateEvent`] the host would deliver.
/// Redirects and scroll requests are recorded instead of performed.
///
/// # Example
///
/// ```
/// use wayfinder_router::{HistoryBackend, MemoryHistory, NavigationTarget};
///
/// let history = MemoryHistory::new("/");
/// history.push_state(&NavigationTarget::path("/about"), "/about").unwrap();
/// assert_eq!(history.location(), "/about");
///
/// let event = history.back().unwrap();
/// assert_eq!(event.state, None);
/// assert_eq!(history.location(), "/");
/// ```
#[derive(Debug)]
pub struct MemoryHistory {
	stack: RefCell<MemoryStack>,
}

impl MemoryHistory {
	/// Creates a stack with a single payload-less entry at `url`.
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			stack: RefCell::new(MemoryStack {
				entries: vec![HistoryEntry {
					url: url.into(),
					state: None,
				}],
				index: 0,
				redirects: Vec::new(),
				scrolls: Vec::new(),
				read_only: false,
			}),
		}
	}

	/// Pushes an entry with an arbitrary raw payload, as foreign code would.
	pub fn push_raw(&self, url: impl Into<String>, state: Option<serde_json::Value>) {
		let mut stack = self.stack.borrow_mut();
		let next = stack.index + 1;
		stack.entries.truncate(next);
		stack.entries.push(HistoryEntry {
			url: url.into(),
			state,
		});
		stack.index = next;
	}

	/// Moves one entry back.
	pub fn back(&self) -> Option<PopStateEvent> {
		self.go(-1)
	}

	/// Moves one entry forward.
	pub fn forward(&self) -> Option<PopStateEvent> {
		self.go(1)
	}

	/// Moves `delta` entries through the stack.
	///
	/// Returns the event to deliver, or `None` if the move is out of range or
	/// `delta` is zero.
	pub fn go(&self, delta: isize) -> Option<PopStateEvent> {
		let mut stack = self.stack.borrow_mut();
		let target = stack.index.checked_add_signed(delta)?;
		if delta == 0 || target >= stack.entries.len() {
			return None;
		}
		stack.index = target;
		Some(PopStateEvent::new(stack.current().state.clone()))
	}

	/// Returns a copy of every entry, oldest first.
	pub fn entries(&self) -> Vec<HistoryEntry> {
		self.stack.borrow().entries.clone()
	}

	/// Returns the current entry.
	pub fn current_entry(&self) -> HistoryEntry {
		self.stack.borrow().current().clone()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.stack.borrow().entries.len()
	}

	/// Always false: the stack has at least its initial entry.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Returns the position of the current entry.
	pub fn index(&self) -> usize {
		self.stack.borrow().index
	}

	/// Returns the redirect URLs requested so far.
	pub fn redirects(&self) -> Vec<String> {
		self.stack.borrow().redirects.clone()
	}

	/// Returns the fragments scrolled to so far.
	pub fn scroll_requests(&self) -> Vec<String> {
		self.stack.borrow().scrolls.clone()
	}

	/// Makes `push_state` and `replace_state` fail, as a sandboxed host would.
	pub fn set_read_only(&self, read_only: bool) {
		self.stack.borrow_mut().read_only = read_only;
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl HistoryBackend for MemoryHistory {
	fn location(&self) -> String {
		self.stack.borrow().current().url.clone()
	}

	fn current_state(&self) -> Option<HistoryState> {
		self.stack
			.borrow()
			.current()
			.state
			.as_ref()
			.and_then(NavigationTarget::from_json)
	}

	fn push_state(&self, state: &HistoryState, url: &str) -> Result<(), HistoryError> {
		self.stack.borrow().check_writable()?;
		self.push_raw(url, Some(state.to_json()?));
		Ok(())
	}

	fn replace_state(&self, state: &HistoryState, url: &str) -> Result<(), HistoryError> {
		let payload = state.to_json()?;
		let mut stack = self.stack.borrow_mut();
		stack.check_writable()?;
		let index = stack.index;
		stack.entries[index] = HistoryEntry {
			url: url.to_string(),
			state: Some(payload),
		};
		Ok(())
	}

	fn redirect(&self, url: &str) {
		self.stack.borrow_mut().redirects.push(url.to_string());
	}

	fn scroll_to_fragment(&self, fragment: &str) {
		self.stack.borrow_mut().scrolls.push(fragment.to_string());
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

#[cfg(target_arch = "wasm32")]
mod browser {
	use super::{HistoryBackend, HistoryState, NavigationTarget};
	use crate::error::HistoryError;
	use wasm_bindgen::JsValue;

	/// Session history of the browser window.
	#[derive(Debug, Clone)]
	pub struct BrowserHistory {
		window: web_sys::Window,
	}

	impl BrowserHistory {
		/// Binds to the global `window`.
		///
		/// # Errors
		///
		/// Returns [`HistoryError::Unavailable`] outside a browser window.
		pub fn new() -> Result<Self, HistoryError> {
			web_sys::window()
				.map(|window| Self { window })
				.ok_or_else(|| HistoryError::Unavailable("no global window".to_string()))
		}

		fn history(&self) -> Result<web_sys::History, HistoryError> {
			self.window.history().map_err(js_error)
		}
	}

	impl HistoryBackend for BrowserHistory {
		fn location(&self) -> String {
			let location = self.window.location();
			let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
			let search = location.search().unwrap_or_default();
			let hash = location.hash().unwrap_or_default();
			format!("{}{}{}", pathname, search, hash)
		}

		fn current_state(&self) -> Option<HistoryState> {
			let state = self.history().and_then(|h| h.state().map_err(js_error));
			match state.and_then(|value| to_json(&value)) {
				Ok(value) => value.as_ref().and_then(NavigationTarget::from_json),
				Err(err) => {
					tracing::warn!(error = %err, "cannot read history state");
					None
				}
			}
		}

		fn push_state(&self, state: &HistoryState, url: &str) -> Result<(), HistoryError> {
			let payload = from_target(state)?;
			self.history()?
				.push_state_with_url(&payload, "", Some(url))
				.map_err(js_error)
		}

		fn replace_state(&self, state: &HistoryState, url: &str) -> Result<(), HistoryError> {
			let payload = from_target(state)?;
			self.history()?
				.replace_state_with_url(&payload, "", Some(url))
				.map_err(js_error)
		}

		fn redirect(&self, url: &str) {
			if let Err(err) = self.window.location().set_href(url) {
				tracing::warn!(url, error = ?err, "redirect failed");
			}
		}

		fn scroll_to_fragment(&self, fragment: &str) {
			let Some(document) = self.window.document() else {
				return;
			};
			let element = document.get_element_by_id(fragment).or_else(|| {
				document
					.query_selector(&super::named_anchor_selector(fragment))
					.ok()
					.flatten()
			});
			match element {
				Some(element) => element.scroll_into_view(),
				None => tracing::debug!(fragment, "no element for fragment"),
			}
		}
	}

	/// Converts a JS history payload to JSON; `null` and `undefined` give `None`.
	pub(crate) fn to_json(value: &JsValue) -> Result<Option<serde_json::Value>, HistoryError> {
		if value.is_null() || value.is_undefined() {
			return Ok(None);
		}
		let text: String = js_sys::JSON::stringify(value).map_err(js_error)?.into();
		Ok(Some(serde_json::from_str(&text)?))
	}

	fn from_target(target: &NavigationTarget) -> Result<JsValue, HistoryError> {
		let text = serde_json::to_string(target)?;
		js_sys::JSON::parse(&text).map_err(js_error)
	}

	fn js_error(err: JsValue) -> HistoryError {
		HistoryError::Operation(format!("{:?}", err))
	}
}

#[cfg(target_arch = "wasm32")]
pub(crate) use browser::to_json as js_to_json;

/// CSS selector for a legacy `<a name="...">` anchor.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn named_anchor_selector(fragment: &str) -> String {
	let escaped = fragment.replace('\\', "\\\\").replace('"', "\\\"");
	format!("a[name=\"{}\"]", escaped)
}
