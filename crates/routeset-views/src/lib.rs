//! # routeset-views
//!
//! Model viewsets and the views they mount.
//!
//! A [`ModelViewSet`] binds one model to a URL helper, a permission helper, a
//! model store and a template renderer, then asks each of its capabilities for
//! routes. [`ModelViewSet::read_only`] gives the usual list + inspect pair.

pub mod capabilities;
pub mod templates;
pub mod views;
pub mod viewset;

pub use capabilities::{ActionCapability, Capability, DeleteCapability, InspectCapability, ListCapability};
pub use templates::{template_candidates, Context, JsonRenderer, TemplateRenderer};
pub use views::{DeleteView, IndexView, InspectView};
pub use viewset::{
	MenuItem, ModelViewSet, ModelViewSetBuilder, RouterContext, ViewSet, ViewSetCore, DEFAULT_MENU_ORDER,
};
