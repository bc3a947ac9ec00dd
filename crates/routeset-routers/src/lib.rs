//! # routeset-routers
//!
//! The [`Registry`] mounts model viewsets under one namespace, prepends an
//! index route, appends hooked routes, and serves the result:
//!
//! - [`Registry::urls`] computes the route list once and caches it
//! - [`Registry::resolve`] / [`Registry::dispatch`] match request paths
//! - [`Registry::each_context`] and [`Registry::menu_items`] feed templates

pub mod index;
pub mod registry;

pub use index::DefaultIndexView;
pub use registry::{Registry, RegistryBuilder, RegistryState, ResolvedRoute};
