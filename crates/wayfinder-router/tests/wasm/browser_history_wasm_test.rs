//! Browser history WASM tests
//!
//! Run with `wasm-pack test --headless --chrome crates/wayfinder-router`.

#![cfg(target_arch = "wasm32")]

use serde_json::json;
use std::rc::Rc;
use wasm_bindgen_test::*;
use wayfinder_router::{
	BrowserHistory, HistoryBackend, NavigationTarget, PopStateEvent, RouteDefinition, Router,
	params, setup_history_listener,
};

wasm_bindgen_test_configure!(run_in_browser);

fn routes() -> Vec<RouteDefinition<&'static str>> {
	vec![
		RouteDefinition::component("/", "Home").name("home"),
		RouteDefinition::component("/contact", "Contact").name("contact"),
		RouteDefinition::component("/users/:id", "User").name("user"),
		RouteDefinition::component("/*rest", "NotFound").name("not-found"),
	]
}

/// Test: payloads round-trip through `window.history`
#[wasm_bindgen_test]
fn test_push_and_read_state() {
	let history = BrowserHistory::new().unwrap();
	let target = NavigationTarget::named("user", params! { "id" => 4 });

	history.push_state(&target, "/users/4").unwrap();

	assert_eq!(history.current_state(), Some(target));
	assert!(history.location().starts_with("/users/4"));
}

/// Test: the router annotates the page's entry and pushes on dispatch
#[wasm_bindgen_test]
fn test_router_over_browser_history() {
	let history = BrowserHistory::new().unwrap();
	history
		.replace_state(&NavigationTarget::path("/"), "/")
		.unwrap();

	let router = Rc::new(Router::new(routes(), history).unwrap());
	setup_history_listener(Rc::clone(&router)).unwrap();

	assert!(router.navigate(NavigationTarget::name("contact")));
	assert_eq!(router.history().location(), "/contact");
	assert_eq!(router.state().active_path(), "/contact");

	let replayed = router.handle_pop_state(&PopStateEvent::new(Some(json!({ "path": "/" }))));
	assert!(replayed.is_some());
	assert_eq!(router.state().active_path(), "/");
}
