//! # routeset-urls
//!
//! URL plumbing for routeset registries:
//!
//! - [`PathPattern`]: `{name}` placeholders compiled to anchored regexes
//! - [`RouteEntry`]: pattern + name + handler, mounted under a prefix
//! - [`UrlReverser`] / [`UrlResolver`]: name-to-URL resolution
//! - [`hooks`]: routes contributed from outside a registry

pub mod hooks;
pub mod pattern;
pub mod reverse;
pub mod route;

pub use hooks::{HookRegistry, HookSupplier, HookTarget, HookedView, NoHooks, SITE_PATH_HOOK, SITE_VIEW_HOOK};
pub use pattern::PathPattern;
pub use reverse::{UrlResolver, UrlReverser};
pub use route::RouteEntry;
