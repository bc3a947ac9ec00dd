//! Route naming, patterns, reversal and cache behaviour of a populated registry.

use routeset::core::InMemoryStore;
use routeset::prelude::*;
use routeset::routers::RegistryState;
use routeset_integration_tests::{category, full_viewset, product, seeded_store, shop_registry};
use rstest::rstest;
use std::sync::Arc;

fn route_table(registry: &Registry) -> Vec<(String, String)> {
	let mount = registry.settings().mount_path.clone();
	registry
		.urls()
		.unwrap()
		.iter()
		.map(|route| {
			(
				route.name().unwrap_or_default().to_string(),
				route.full_path(&mount),
			)
		})
		.collect()
}

#[rstest]
fn test_full_viewset_route_table() {
	// Arrange
	let registry = shop_registry(seeded_store());

	// Act
	let table = route_table(&registry);

	// Assert
	let expected = [
		("admin_index", "/"),
		("admin_shop_product_index", "/product/"),
		("admin_shop_product_inspect", "/product/inspect/{pk}/"),
		("admin_shop_product_edit", "/product/edit/{pk}/"),
		("admin_shop_product_delete", "/product/delete/{pk}/"),
	];
	let expected: Vec<(String, String)> = expected
		.iter()
		.map(|(n, p)| (n.to_string(), p.to_string()))
		.collect();
	assert_eq!(table, expected);
}

#[rstest]
#[case(Action::Index, vec![], "/product/")]
#[case(Action::Inspect, vec!["3"], "/product/inspect/3/")]
#[case(Action::Edit, vec!["3"], "/product/edit/3/")]
#[case(Action::Delete, vec!["3"], "/product/delete/3/")]
fn test_object_url(#[case] action: Action, #[case] args: Vec<&str>, #[case] expected: &str) {
	let registry = shop_registry(seeded_store());
	assert_eq!(registry.object_url(&product(), &action, &args).unwrap(), expected);
}

#[rstest]
fn test_object_url_for_unregistered_action_is_route_not_found() {
	let registry = shop_registry(seeded_store());
	let err = registry
		.object_url(&product(), &Action::Create, &[] as &[&str])
		.unwrap_err();
	assert!(matches!(err, Error::RouteNotFound(_)));
}

#[rstest]
fn test_quoted_pk_round_trips_through_resolution() {
	let registry = shop_registry(seeded_store());
	let helper = registry.url_helper_for("shop", "product");

	let url = helper.object_url(&Action::Inspect, "a/b").unwrap();
	assert_eq!(url, "/product/inspect/a_2Fb/");

	let resolved = registry.resolve(&url).unwrap().unwrap();
	assert_eq!(resolved.route.name(), Some("admin_shop_product_inspect"));
	assert_eq!(resolved.params["pk"], "a_2Fb");
}

#[rstest]
fn test_urls_is_idempotent_until_register() {
	// Arrange
	let mut registry = shop_registry(seeded_store());
	let first = registry.urls().unwrap();

	// Act
	let second = registry.urls().unwrap();

	// Assert
	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(registry.state(), RegistryState::Frozen);

	let categories = ModelViewSet::read_only(&registry.context())
		.model(category())
		.store(Arc::new(InMemoryStore::new()))
		.build()
		.unwrap();
	registry.register(categories).unwrap();
	assert_eq!(registry.state(), RegistryState::Populated);

	let third = registry.urls().unwrap();
	assert!(!Arc::ptr_eq(&first, &third));
	assert_eq!(third.len(), first.len() + 2);
	assert!(registry.resolver().has_route("admin_shop_category_inspect"));
}

#[rstest]
fn test_registered_viewsets_keep_registration_order() {
	let mut registry = Registry::builder("admin").build().unwrap();
	let categories = ModelViewSet::read_only(&registry.context())
		.model(category())
		.build()
		.unwrap();
	let products = full_viewset(&registry, seeded_store()).build().unwrap();
	registry.register(categories).unwrap();
	registry.register_with(products, Some("catalogue/products"), None).unwrap();

	let names: Vec<String> = route_table(&registry).into_iter().map(|(n, _)| n).collect();
	assert_eq!(names[1], "admin_shop_category_index");
	assert_eq!(names[3], "admin_shop_product_index");
	assert!(
		registry
			.resolve("/catalogue/products/delete/2/")
			.unwrap()
			.is_some()
	);
}

#[rstest]
fn test_same_model_twice_is_a_configuration_error() {
	let mut registry = shop_registry(seeded_store());
	let again = full_viewset(&registry, seeded_store()).build().unwrap();
	registry.register_with(again, Some("again"), None).unwrap();

	let err = registry.urls().unwrap_err();
	assert!(err.is_configuration());
}

#[rstest]
fn test_menu_lists_every_viewset() {
	let mut registry = shop_registry(seeded_store());
	let categories = ModelViewSet::read_only(&registry.context())
		.model(category())
		.menu_icon("folder")
		.menu_order(10)
		.build()
		.unwrap();
	registry.register(categories).unwrap();

	let menu = registry.menu_items();
	assert_eq!(menu.len(), 2);
	assert_eq!(menu[0].label, "Categories");
	assert_eq!(menu[0].icon.as_deref(), Some("folder"));
	assert_eq!(menu[1].label, "Products");
}
