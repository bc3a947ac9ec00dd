//! Routes contributed through the registry hooks.

use routeset::prelude::*;
use routeset::urls::{SITE_PATH_HOOK, SITE_VIEW_HOOK};
use routeset_integration_tests::{full_viewset, placeholder_handler, seeded_store};
use rstest::rstest;
use std::sync::Arc;

fn hooked_registry(hooks: HookRegistry) -> Registry {
	let mut registry = Registry::builder("admin")
		.hooks(Arc::new(hooks))
		.build()
		.unwrap();
	let viewset = full_viewset(&registry, seeded_store()).build().unwrap();
	registry.register(viewset).unwrap();
	registry
}

#[rstest]
fn test_hooked_routes_come_after_viewsets() {
	// Arrange
	let mut hooks = HookRegistry::new();
	hooks
		.add_handler("reports.summary", placeholder_handler())
		.add_view(
			SITE_VIEW_HOOK,
			HookedView::new("reports/", HookTarget::Reference("reports.summary".into()))
				.with_name("admin_reports"),
		)
		.add_path(
			SITE_PATH_HOOK,
			RouteEntry::from_handler("status/", placeholder_handler()).with_name("admin_status"),
		);
	let registry = hooked_registry(hooks);

	// Act
	let names: Vec<String> = registry
		.urls()
		.unwrap()
		.iter()
		.filter_map(|route| route.name().map(String::from))
		.collect();

	// Assert
	assert_eq!(names.first().map(String::as_str), Some("admin_index"));
	assert_eq!(
		&names[names.len() - 2..],
		&["admin_reports".to_string(), "admin_status".to_string()]
	);
	assert_eq!(
		registry.resolver().reverse_positional::<&str>("admin_reports", &[]).unwrap(),
		"/reports/"
	);
}

#[rstest]
#[tokio::test]
async fn test_hooked_view_is_dispatched() {
	let mut hooks = HookRegistry::new();
	hooks.add_view(
		SITE_VIEW_HOOK,
		HookedView::new(
			"ping/",
			HookTarget::Callable(FunctionHandler::new(|_req: Request| async {
				Ok(Response::ok().with_body("pong"))
			})),
		),
	);
	let registry = hooked_registry(hooks);

	let response = registry.dispatch(Request::get("/ping/")).await.unwrap();
	assert_eq!(response.body_text().unwrap(), "pong");
}

#[rstest]
fn test_hook_with_unknown_reference_fails_urls() {
	let mut hooks = HookRegistry::new();
	hooks.add_view(
		SITE_VIEW_HOOK,
		HookedView::new("broken/", HookTarget::Reference("does.not.exist".into())),
	);
	let registry = hooked_registry(hooks);

	let err = registry.urls().unwrap_err();
	assert!(err.is_configuration());
	assert!(err.to_string().contains("does.not.exist"));
}

#[rstest]
fn test_hook_name_colliding_with_viewset_route_fails_urls() {
	let mut hooks = HookRegistry::new();
	hooks.add_path(
		SITE_PATH_HOOK,
		RouteEntry::from_handler("other/", placeholder_handler())
			.with_name("admin_shop_product_index"),
	);
	let registry = hooked_registry(hooks);

	assert!(registry.urls().unwrap_err().is_configuration());
}
