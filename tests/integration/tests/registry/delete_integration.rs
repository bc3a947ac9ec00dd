//! The delete flow: confirmation, permission gate, success and store failure.

use http::StatusCode;
use routeset::core::{Level, MessagesContainer, ModelStore};
use routeset::prelude::*;
use routeset_integration_tests::{
	FailingDeleteStore, UnreachableStore, capture_logs, deleter, editor, product, rendered,
	seeded_store, shop_registry,
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test]
async fn test_get_renders_confirmation_with_cancel_url() {
	let registry = shop_registry(seeded_store());

	let response = registry
		.dispatch(Request::get("/product/delete/3/").with_user(deleter()))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	let body = rendered(&response);
	assert_eq!(body["template"], "admin/shop/product/delete.html");
	assert_eq!(body["context"]["object"]["pk"], "3");
	assert_eq!(body["context"]["cancel_url"], "/product/");
}

#[rstest]
#[tokio::test]
async fn test_forbidden_delete_leaves_record() {
	// Arrange
	let store = seeded_store();
	let registry = shop_registry(store.clone());
	let messages = MessagesContainer::new();
	let request = Request::post("/product/delete/2/")
		.with_user(editor())
		.with_messages(messages.clone());

	// Act
	let response = registry.dispatch(request).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::FORBIDDEN);
	assert!(store.get(&product(), "2").await.unwrap().is_some());
	assert!(messages.get_messages().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_successful_delete_redirects_with_one_message() {
	// Arrange
	let store = seeded_store();
	let registry = shop_registry(store.clone());
	let messages = MessagesContainer::new();
	let request = Request::post("/product/delete/2/")
		.with_user(deleter())
		.with_messages(messages.clone());

	// Act
	let response = registry.dispatch(request).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.location(), Some("/product/"));
	assert!(store.get(&product(), "2").await.unwrap().is_none());
	assert_eq!(store.len(&product()), 2);

	let messages = messages.get_messages();
	assert_eq!(messages.len(), 1);
	assert_eq!(messages[0].level, Level::Success);
	assert_eq!(messages[0].text, "Product '2' deleted.");
}

#[rstest]
#[tokio::test]
async fn test_delete_of_missing_record_is_not_found() {
	let store = seeded_store();
	let registry = shop_registry(store.clone());

	let response = registry
		.dispatch(Request::post("/product/delete/42/").with_user(deleter()))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert_eq!(store.len(&product()), 3);
}

#[rstest]
#[tokio::test]
async fn test_store_failure_redirects_with_error_and_logs() {
	// Arrange
	let (logs, _guard) = capture_logs();
	let inner = seeded_store();
	let registry = shop_registry(Arc::new(FailingDeleteStore(inner.clone())));
	let messages = MessagesContainer::new();
	let request = Request::post("/product/delete/1/")
		.with_user(deleter())
		.with_messages(messages.clone());

	// Act
	let response = registry.dispatch(request).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.location(), Some("/product/"));
	assert_eq!(inner.len(&product()), 3);

	let messages = messages.get_messages();
	assert_eq!(messages.len(), 1);
	assert_eq!(messages[0].level, Level::Error);
	assert_eq!(messages[0].text, "Product '1' could not be deleted.");

	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|line| line.starts_with("[ERROR]") && line.contains("failed to delete record")),
		"expected an error log, got {:?}",
		*captured
	);
}

#[rstest]
#[tokio::test]
async fn test_lookup_failure_redirects_with_error_and_logs() {
	// Arrange
	let (logs, _guard) = capture_logs();
	let registry = shop_registry(Arc::new(UnreachableStore));
	let messages = MessagesContainer::new();
	let request = Request::post("/product/delete/1/")
		.with_user(deleter())
		.with_messages(messages.clone());

	// Act
	let response = registry.dispatch(request).await.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::FOUND);
	assert_eq!(response.location(), Some("/product/"));

	let messages = messages.get_messages();
	assert_eq!(messages.len(), 1);
	assert_eq!(messages[0].level, Level::Error);
	assert_eq!(messages[0].text, "Product '1' could not be deleted.");
	assert!(
		logs.lock()
			.unwrap()
			.iter()
			.any(|line| line.starts_with("[ERROR]") && line.contains("failed to delete record"))
	);
}

#[rstest]
#[tokio::test]
async fn test_delete_without_index_route_falls_back_to_mount_path() {
	// Arrange
	let (logs, _guard) = capture_logs();
	let store = seeded_store();
	let mut registry = Registry::builder("admin").build().unwrap();
	let viewset = ModelViewSet::builder(&registry.context())
		.model(product())
		.store(store.clone())
		.capability(DeleteCapability::new())
		.build()
		.unwrap();
	registry.register(viewset).unwrap();

	// Act
	let response = registry
		.dispatch(Request::post("/product/delete/3/").with_user(deleter()))
		.await
		.unwrap();

	// Assert
	assert_eq!(response.location(), Some("/"));
	assert_eq!(store.len(&product()), 2);
	assert!(
		logs.lock()
			.unwrap()
			.iter()
			.any(|line| line.starts_with("[WARN]"))
	);
}

#[rstest]
#[tokio::test]
async fn test_unsupported_method_is_rejected() {
	let registry = shop_registry(seeded_store());
	let request = Request::new(http::Method::PUT, "/product/delete/1/").with_user(deleter());

	let response = registry.dispatch(request).await.unwrap();

	assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[rstest]
#[tokio::test]
async fn test_removed_records_disappear_from_index() {
	let store = seeded_store();
	let registry = shop_registry(store.clone());
	registry
		.dispatch(Request::post("/product/delete/1/").with_user(deleter()))
		.await
		.unwrap();

	let response = registry
		.dispatch(Request::get("/product/").with_user(deleter()))
		.await
		.unwrap();

	let objects = rendered(&response)["context"]["objects"].clone();
	assert_eq!(objects.as_array().unwrap().len(), 2);
	assert_eq!(objects[0]["pk"], "2");
}
