//! Back/forward replay.
//!
//! When the host restores a history entry, the router re-resolves the
//! entry's payload without writing history: the host has already moved, and
//! pushing again would corrupt the stack.

use crate::history::{HistoryBackend, NavigationTarget, PopStateEvent};
use crate::navigator::{NavigationOutcome, Router};

impl<C, H: HistoryBackend> Router<C, H> {
	/// Replays a restored history entry.
	///
	/// `{name, params}` payloads resolve by name, `{path}` payloads by path.
	/// Returns `None` for entries without a payload or with one this router
	/// did not write.
	pub fn handle_pop_state(&self, event: &PopStateEvent) -> Option<NavigationOutcome> {
		let Some(raw) = &event.state else {
			tracing::debug!("pop state without payload ignored");
			return None;
		};
		let Some(target) = NavigationTarget::from_json(raw) else {
			tracing::warn!(payload = %raw, "unrecognized pop state payload ignored");
			return None;
		};

		tracing::debug!(%target, "replaying history entry");
		let outcome = match target {
			NavigationTarget::Named { name, params } => self.navigate_by_name(&name, params, false),
			NavigationTarget::Path { path } => self.navigate_by_path(&path, false),
		};
		Some(outcome)
	}
}

/// Installs the `popstate` listener that feeds back/forward navigation into
/// `router`.
///
/// The listener lives for the rest of the page, as does `router`.
///
/// # Errors
///
/// Returns [`HistoryError::Unavailable`](crate::HistoryError::Unavailable)
/// outside a browser window, or [`HistoryError::Operation`](crate::HistoryError::Operation)
/// if the listener cannot be registered.
#[cfg(target_arch = "wasm32")]
pub fn setup_history_listener<C: 'static>(
	router: std::rc::Rc<Router<C, crate::history::BrowserHistory>>,
) -> Result<(), crate::error::HistoryError> {
	use crate::error::HistoryError;
	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	let window = web_sys::window()
		.ok_or_else(|| HistoryError::Unavailable("no global window".to_string()))?;

	let handler = Closure::wrap(Box::new(move |event: web_sys::Event| {
		let state = match event.dyn_ref::<web_sys::PopStateEvent>() {
			Some(event) => crate::history::js_to_json(&event.state()),
			None => Ok(None),
		};
		match state {
			Ok(state) => {
				router.handle_pop_state(&PopStateEvent::new(state));
			}
			Err(err) => tracing::warn!(error = %err, "cannot decode pop state payload"),
		}
	}) as Box<dyn FnMut(_)>);

	window
		.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
		.map_err(|err| HistoryError::Operation(format!("{:?}", err)))?;
	handler.forget();

	Ok(())
}
