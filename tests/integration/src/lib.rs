//! Shared fixtures for the routeset integration tests.

use async_trait::async_trait;
use routeset::core::{
	Error, FunctionHandler, InMemoryStore, ModelStore, Request, Response, Result, SimpleUser,
};
use routeset::prelude::*;
use routeset::views::ModelViewSetBuilder;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

pub const NAMESPACE: &str = "admin";

pub fn product() -> ModelDescriptor {
	ModelDescriptor::new("shop", "product")
}

pub fn category() -> ModelDescriptor {
	ModelDescriptor::new("shop", "category").with_verbose_name_plural("categories")
}

/// Three products: Lamp (1), Desk (2), Chair (3)
pub fn seeded_store() -> Arc<InMemoryStore> {
	let store = InMemoryStore::new();
	let model = product();
	store.insert(&model, Record::new("1").with_field("name", json!("Lamp")).with_field("price", json!(15)));
	store.insert(&model, Record::new("2").with_field("name", json!("Desk")).with_field("price", json!(120)));
	store.insert(&model, Record::new("3").with_field("name", json!("Chair")).with_field("price", json!(60)));
	Arc::new(store)
}

/// Store that reads through to an [`InMemoryStore`] and fails every delete
pub struct FailingDeleteStore(pub Arc<InMemoryStore>);

#[async_trait]
impl ModelStore for FailingDeleteStore {
	async fn list(&self, model: &ModelDescriptor, ordering: &[String]) -> Result<Vec<Record>> {
		self.0.list(model, ordering).await
	}

	async fn get(&self, model: &ModelDescriptor, pk: &str) -> Result<Option<Record>> {
		self.0.get(model, pk).await
	}

	async fn delete(&self, model: &ModelDescriptor, pk: &str) -> Result<()> {
		Err(Error::Store(format!("{} {} is referenced elsewhere", model.slug(), pk)))
	}
}

/// Store whose backend is gone: every call fails
pub struct UnreachableStore;

#[async_trait]
impl ModelStore for UnreachableStore {
	async fn list(&self, _model: &ModelDescriptor, _ordering: &[String]) -> Result<Vec<Record>> {
		Err(Error::Store("connection reset".to_string()))
	}

	async fn get(&self, _model: &ModelDescriptor, _pk: &str) -> Result<Option<Record>> {
		Err(Error::Store("connection reset".to_string()))
	}

	async fn delete(&self, _model: &ModelDescriptor, _pk: &str) -> Result<()> {
		Err(Error::Store("connection reset".to_string()))
	}
}

pub fn superuser() -> Arc<dyn Actor> {
	Arc::new(SimpleUser::superuser("root"))
}

pub fn viewer() -> Arc<dyn Actor> {
	Arc::new(SimpleUser::new("viewer").with_permission("shop.view_product"))
}

pub fn editor() -> Arc<dyn Actor> {
	Arc::new(
		SimpleUser::new("editor")
			.with_permissions(["shop.view_product", "shop.change_product"]),
	)
}

pub fn deleter() -> Arc<dyn Actor> {
	Arc::new(
		SimpleUser::new("deleter")
			.with_permissions(["shop.view_product", "shop.delete_product"]),
	)
}

pub fn placeholder_handler() -> FunctionHandler {
	FunctionHandler::new(|_req: Request| async { Ok(Response::ok()) })
}

/// List, inspect, edit and delete routes for `product()` over `store`
pub fn full_viewset(registry: &Registry, store: Arc<dyn ModelStore>) -> ModelViewSetBuilder {
	ModelViewSet::builder(&registry.context())
		.model(product())
		.store(store)
		.capability(ListCapability::new())
		.capability(InspectCapability::new())
		.capability(ActionCapability::new(Action::Edit, placeholder_handler()))
		.capability(DeleteCapability::new())
}

/// Registry in [`NAMESPACE`] with the full product viewset registered
pub fn shop_registry(store: Arc<dyn ModelStore>) -> Registry {
	let mut registry = Registry::builder(NAMESPACE)
		.build()
		.expect("registry should build with default settings");
	let viewset = full_viewset(&registry, store)
		.build()
		.expect("product viewset should build");
	registry.register(viewset).expect("product viewset should register");
	registry
}

/// Parses a [`JsonRenderer`](routeset::views::JsonRenderer) response body
pub fn rendered(response: &Response) -> serde_json::Value {
	let body = response.body_text().expect("body should be utf-8");
	serde_json::from_str(body).expect("body should be JSON")
}

/// Tracing layer collecting `[LEVEL] message` lines
pub struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		if let Ok(mut logs) = self.logs.lock() {
			logs.push(format!("[{}] {}", event.metadata().level(), visitor.message));
		}
	}
}

/// Installs a capturing subscriber for the current thread until the guard drops
pub fn capture_logs() -> (Arc<Mutex<Vec<String>>>, DefaultGuard) {
	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: Arc::clone(&logs) };
	let guard = tracing_subscriber::registry().with(capture).set_default();
	(logs, guard)
}
