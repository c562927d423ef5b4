//! Facade integration tests
//!
//! Verifies that the facade exposes the engine through the prelude and the
//! `router` module path.

use rstest::*;
use serde_json::json;
use wayfinder::prelude::*;

/// Test: a router built from prelude types navigates by name
///
/// Category: Integration
#[rstest]
fn test_prelude_router() {
	let router = Router::new(
		vec![
			RouteDefinition::component("/", "Home").name("home"),
			RouteDefinition::component("/users/:id", "User").name("user"),
		],
		MemoryHistory::new("/"),
	)
	.unwrap();

	assert!(router.navigate(NavigationTarget::named("user", params! { "id" => 3 })));
	assert_eq!(router.state().active_path(), "/users/3");
	assert_eq!(
		router.history().current_entry().state,
		Some(json!({ "name": "user", "params": { "id": 3 } }))
	);
}

/// Test: the engine is reachable under `wayfinder::router`
///
/// Category: Integration
#[rstest]
fn test_router_module_path() {
	let pattern = wayfinder::router::PathPattern::new("/docs/*page").unwrap();

	let params = pattern.matches("/docs/guide/intro").unwrap();

	assert_eq!(params["page"], ParamValue::from("guide/intro"));
}
