//! Index and inspect pages served through the registry.

use http::StatusCode;
use routeset::prelude::*;
use routeset_integration_tests::{
	NAMESPACE, deleter, editor, product, rendered, seeded_store, shop_registry, superuser, viewer,
};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn labels(buttons: &Value) -> Vec<String> {
	buttons
		.as_array()
		.unwrap()
		.iter()
		.map(|b| b["label"].as_str().unwrap().to_string())
		.collect()
}

#[rstest]
#[tokio::test]
async fn test_index_lists_records_in_pk_order() {
	// Arrange
	let registry = shop_registry(seeded_store());
	let request = Request::get("/product/").with_user(viewer());

	// Act
	let response = registry.dispatch(request).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::OK);
	let body = rendered(&response);
	assert_eq!(body["template"], "admin/shop/product/index.html");
	assert_eq!(body["context"]["title"], "Products");
	let pks: Vec<&str> = body["context"]["objects"]
		.as_array()
		.unwrap()
		.iter()
		.map(|o| o["pk"].as_str().unwrap())
		.collect();
	assert_eq!(pks, vec!["1", "2", "3"]);
	assert!(body["context"]["add_button"].is_null());
}

#[rstest]
#[case::viewer(viewer(), vec!["Inspect"])]
#[case::editor(editor(), vec!["Inspect", "Edit"])]
#[case::deleter(deleter(), vec!["Inspect", "Delete"])]
#[case::superuser(superuser(), vec!["Inspect", "Edit", "Delete"])]
#[tokio::test]
async fn test_index_buttons_follow_permissions(
	#[case] actor: Arc<dyn Actor>,
	#[case] expected: Vec<&str>,
) {
	let registry = shop_registry(seeded_store());

	let response = registry
		.dispatch(Request::get("/product/").with_user(actor))
		.await
		.unwrap();

	let body = rendered(&response);
	let first = &body["context"]["objects"][0];
	assert_eq!(labels(&first["buttons"]), expected);
}

#[rstest]
#[tokio::test]
async fn test_delete_button_carries_quoted_url_and_classes() {
	let registry = shop_registry(seeded_store());

	let response = registry
		.dispatch(Request::get("/product/").with_user(superuser()))
		.await
		.unwrap();

	let body = rendered(&response);
	let delete = &body["context"]["objects"][1]["buttons"][2];
	assert_eq!(delete["url"], "/product/delete/2/");
	assert_eq!(delete["classname"], "button no");
	assert_eq!(delete["title"], "Delete this product");
}

#[rstest]
#[tokio::test]
async fn test_index_forbidden_without_model_permissions() {
	let registry = shop_registry(seeded_store());
	let outsider: Arc<dyn Actor> = Arc::new(SimpleUser::new("outsider"));

	let anonymous = registry.dispatch(Request::get("/product/")).await.unwrap();
	let unprivileged = registry
		.dispatch(Request::get("/product/").with_user(outsider))
		.await
		.unwrap();

	assert_eq!(anonymous.status, StatusCode::FORBIDDEN);
	assert_eq!(unprivileged.status, StatusCode::FORBIDDEN);
}

#[rstest]
#[tokio::test]
async fn test_inspect_page_excludes_its_own_button() {
	let registry = shop_registry(seeded_store());

	let response = registry
		.dispatch(Request::get("/product/inspect/2/").with_user(superuser()))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	let body = rendered(&response);
	assert_eq!(body["context"]["title"], "Product Detail");
	assert_eq!(body["context"]["object"]["fields"]["name"], "Desk");
	assert_eq!(labels(&body["context"]["buttons"]), vec!["Edit", "Delete"]);
}

#[rstest]
#[case("/product/inspect/99/", StatusCode::NOT_FOUND)]
#[case("/product/inspect/1/extra/", StatusCode::NOT_FOUND)]
#[case("/nowhere/", StatusCode::NOT_FOUND)]
#[tokio::test]
async fn test_unknown_targets_are_not_found(#[case] path: &str, #[case] status: StatusCode) {
	let registry = shop_registry(seeded_store());
	let response = registry
		.dispatch(Request::get(path).with_user(superuser()))
		.await
		.unwrap();
	assert_eq!(response.status, status);
}

#[rstest]
#[tokio::test]
async fn test_site_index_lists_menu() {
	let registry = shop_registry(seeded_store());

	let response = registry.dispatch(Request::get("/")).await.unwrap();

	let body = rendered(&response);
	assert_eq!(body["template"], "index.html");
	assert_eq!(body["context"]["site_header"], "Administration");
	assert_eq!(body["context"]["menu_items"][0]["label"], "Products");
}

#[rstest]
#[tokio::test]
async fn test_read_only_viewset_offers_only_routed_buttons() {
	// Arrange
	let mut registry = Registry::builder(NAMESPACE).build().unwrap();
	let viewset = ModelViewSet::read_only(&registry.context())
		.model(product())
		.store(seeded_store())
		.build()
		.unwrap();
	registry.register(viewset).unwrap();

	// Act
	let index = registry
		.dispatch(Request::get("/product/").with_user(superuser()))
		.await
		.unwrap();
	let inspect = registry
		.dispatch(Request::get("/product/inspect/1/").with_user(superuser()))
		.await
		.unwrap();

	// Assert
	assert_eq!(index.status, StatusCode::OK);
	let body = rendered(&index);
	assert_eq!(labels(&body["context"]["objects"][0]["buttons"]), vec!["Inspect"]);
	assert_eq!(inspect.status, StatusCode::OK);
	assert!(labels(&rendered(&inspect)["context"]["buttons"]).is_empty());
}

#[rstest]
#[case("ann@example.com", "/product/inspect/ann_40example_2Ecom/")]
#[case("1.5", "/product/inspect/1_2E5/")]
#[case("café", "/product/inspect/caf_C3_A9/")]
#[tokio::test]
async fn test_keys_outside_the_token_syntax_are_quoted(#[case] pk: &str, #[case] url: &str) {
	// Arrange
	let store = seeded_store();
	store.insert(&product(), Record::new(pk).with_field("name", json!("Odd")));
	let registry = shop_registry(store);

	// Act
	let index = registry
		.dispatch(Request::get("/product/").with_user(viewer()))
		.await
		.unwrap();
	let inspect = registry
		.dispatch(Request::get(url).with_user(viewer()))
		.await
		.unwrap();

	// Assert
	assert_eq!(index.status, StatusCode::OK);
	let objects = rendered(&index)["context"]["objects"].clone();
	let odd = objects
		.as_array()
		.unwrap()
		.iter()
		.find(|o| o["pk"] == pk)
		.unwrap()
		.clone();
	assert_eq!(odd["buttons"][0]["url"], url);
	assert_eq!(inspect.status, StatusCode::OK);
	assert_eq!(rendered(&inspect)["context"]["object"]["pk"], pk);
}

#[rstest]
#[case("/product/inspect/1/")]
#[case("/product/inspect/99/")]
#[tokio::test]
async fn test_inspect_without_permission_hides_existence(#[case] path: &str) {
	let registry = shop_registry(seeded_store());
	let outsider: Arc<dyn Actor> = Arc::new(SimpleUser::new("outsider"));

	let response = registry
		.dispatch(Request::get(path).with_user(outsider))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::FORBIDDEN);
}
