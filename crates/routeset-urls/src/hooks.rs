//! Extra routes contributed from outside the registry.
//!
//! A registry asks its [`HookSupplier`] for two hooks while building routes:
//! [`SITE_VIEW_HOOK`] yields `(path, target, name)` triples that still need a
//! handler, [`SITE_PATH_HOOK`] yields ready-made [`RouteEntry`] values.

use crate::route::RouteEntry;
use routeset_core::exception::{Error, Result};
use routeset_core::http::{FunctionHandler, Handler};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub const SITE_VIEW_HOOK: &str = "REGISTER_SITE_VIEW";
pub const SITE_PATH_HOOK: &str = "REGISTER_SITE_PATH";

/// What a hooked view points at
#[derive(Clone)]
pub enum HookTarget {
	View(Arc<dyn Handler>),
	Callable(FunctionHandler),
	/// Name to be looked up through [`HookSupplier::lookup_handler`]
	Reference(String),
}

impl fmt::Debug for HookTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			HookTarget::View(_) => f.write_str("View(..)"),
			HookTarget::Callable(_) => f.write_str("Callable(..)"),
			HookTarget::Reference(name) => f.debug_tuple("Reference").field(name).finish(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct HookedView {
	pub path: String,
	pub target: HookTarget,
	pub name: Option<String>,
}

impl HookedView {
	pub fn new(path: impl Into<String>, target: HookTarget) -> Self {
		Self {
			path: path.into(),
			target,
			name: None,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Turns the hook into a route, resolving references through `supplier`
	///
	/// # Errors
	///
	/// `Error::Configuration` when the target is a reference no handler is
	/// registered under.
	pub fn into_route(self, supplier: &dyn HookSupplier) -> Result<RouteEntry> {
		let handler: Arc<dyn Handler> = match self.target {
			HookTarget::View(handler) => handler,
			HookTarget::Callable(func) => Arc::new(func),
			HookTarget::Reference(reference) => {
				supplier.lookup_handler(&reference).ok_or_else(|| {
					Error::Configuration(format!(
						"hooked view at {:?} targets {:?}, which is neither a view nor a callable",
						self.path, reference
					))
				})?
			}
		};
		let route = RouteEntry::new(self.path, handler);
		Ok(match self.name {
			Some(name) => route.with_name(name),
			None => route,
		})
	}
}

/// Source of externally contributed routes
pub trait HookSupplier: Send + Sync {
	/// Hooked views registered under `hook`, in registration order
	fn view_hooks(&self, hook: &str) -> Vec<HookedView>;

	/// Ready-made routes registered under `hook`, in registration order
	fn path_hooks(&self, hook: &str) -> Vec<RouteEntry>;

	fn lookup_handler(&self, _reference: &str) -> Option<Arc<dyn Handler>> {
		None
	}
}

/// Supplier contributing nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl HookSupplier for NoHooks {
	fn view_hooks(&self, _hook: &str) -> Vec<HookedView> {
		Vec::new()
	}

	fn path_hooks(&self, _hook: &str) -> Vec<RouteEntry> {
		Vec::new()
	}
}

/// In-process hook table
///
/// # Examples
///
/// ```
/// use routeset_core::http::{FunctionHandler, Request, Response};
/// use routeset_urls::hooks::{HookRegistry, HookSupplier, HookTarget, HookedView, SITE_VIEW_HOOK};
///
/// let mut hooks = HookRegistry::new();
/// hooks.add_view(
/// 	SITE_VIEW_HOOK,
/// 	HookedView::new("reports/", HookTarget::Reference("reports".into())).with_name("admin_reports"),
/// );
/// hooks.add_handler(
/// 	"reports",
/// 	FunctionHandler::new(|_req: Request| async { Ok(Response::ok()) }),
/// );
///
/// let views = hooks.view_hooks(SITE_VIEW_HOOK);
/// assert_eq!(views.len(), 1);
/// assert!(hooks.lookup_handler("reports").is_some());
/// ```
#[derive(Default)]
pub struct HookRegistry {
	views: HashMap<String, Vec<HookedView>>,
	paths: HashMap<String, Vec<RouteEntry>>,
	handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HookRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_view(&mut self, hook: impl Into<String>, view: HookedView) -> &mut Self {
		self.views.entry(hook.into()).or_default().push(view);
		self
	}

	pub fn add_path(&mut self, hook: impl Into<String>, route: RouteEntry) -> &mut Self {
		self.paths.entry(hook.into()).or_default().push(route);
		self
	}

	pub fn add_handler<H>(&mut self, reference: impl Into<String>, handler: H) -> &mut Self
	where
		H: Handler + 'static,
	{
		self.handlers.insert(reference.into(), Arc::new(handler));
		self
	}
}

impl HookSupplier for HookRegistry {
	fn view_hooks(&self, hook: &str) -> Vec<HookedView> {
		self.views.get(hook).cloned().unwrap_or_default()
	}

	fn path_hooks(&self, hook: &str) -> Vec<RouteEntry> {
		self.paths.get(hook).cloned().unwrap_or_default()
	}

	fn lookup_handler(&self, reference: &str) -> Option<Arc<dyn Handler>> {
		self.handlers.get(reference).cloned()
	}
}

impl fmt::Debug for HookRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HookRegistry")
			.field("views", &self.views)
			.field("paths", &self.paths)
			.field("handlers", &self.handlers.keys().collect::<Vec<_>>())
			.finish()
	}
}
