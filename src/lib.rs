//! # routeset
//!
//! Route, permission and button plumbing for model-backed admin viewsets.
//!
//! A [`Registry`] owns a namespace. Each [`ModelViewSet`] registered with it
//! contributes named routes (`{namespace}_{app}_{model}_{action}`) built from
//! its capabilities; the registry prepends an index route, appends hooked
//! routes, and resolves and dispatches request paths against the result.
//! Views consult a [`PermissionHelper`] before acting and render object
//! buttons through a [`ButtonHelper`].
//!
//! ## Crates
//!
//! - [`core`]: errors, request/response, models, actors, messages, stores
//! - [`conf`]: [`RoutesSettings`] and its sources
//! - [`urls`]: patterns, route entries, reversal, hooks
//! - [`helpers`]: URL, permission and button helpers
//! - [`views`]: viewsets, capabilities, views, template rendering
//! - [`routers`]: the registry
//!
//! ## Quick Example
//!
//! ```
//! use routeset::prelude::*;
//!
//! let mut registry = Registry::builder("admin").build().unwrap();
//! let products = ModelViewSet::builder(&registry.context())
//! 	.model(ModelDescriptor::new("shop", "product"))
//! 	.capability(ListCapability::new())
//! 	.capability(InspectCapability::new())
//! 	.capability(DeleteCapability::new())
//! 	.build()
//! 	.unwrap();
//! registry.register(products).unwrap();
//!
//! let urls = registry.urls().unwrap();
//! assert_eq!(urls.len(), 4);
//! assert_eq!(
//! 	registry
//! 		.object_url(&ModelDescriptor::new("shop", "product"), &Action::Delete, &["7"])
//! 		.unwrap(),
//! 	"/product/delete/7/"
//! );
//! ```

pub mod conf;
pub mod core;
pub mod helpers;
pub mod routers;
pub mod urls;
pub mod views;

pub use routeset_conf::{RoutesSettings, SettingsError};
pub use routeset_core::{
	Action, Actor, Error, Handler, ModelDescriptor, PermissionBackend, Record, Request, Response,
	Result,
};
pub use routeset_helpers::{ButtonHelper, PermissionHelper, UrlHelper};
pub use routeset_routers::{Registry, RegistryBuilder};
pub use routeset_views::{ModelViewSet, ViewSet};

pub mod prelude {
	pub use crate::{
		Action, Actor, ButtonHelper, Error, Handler, ModelDescriptor, ModelViewSet,
		PermissionBackend, PermissionHelper, Record, Registry, Request, Response, Result,
		RoutesSettings, UrlHelper, ViewSet,
	};
	pub use routeset_core::{
		FunctionHandler, InMemoryStore, Message, ModelBackend, ModelStore, SimpleUser,
	};
	pub use routeset_urls::{HookRegistry, HookTarget, HookedView, RouteEntry};
	pub use routeset_views::{
		ActionCapability, DeleteCapability, InspectCapability, ListCapability,
	};

	pub use async_trait::async_trait;
	pub use serde::{Deserialize, Serialize};
}
