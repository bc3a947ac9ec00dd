use routeset_core::http::Handler;
use std::fmt;
use std::sync::Arc;

/// One routable entry: a path pattern, an optional name and the handler it invokes
///
/// `pattern` is relative to `prefix`, which is relative to the mount path the
/// whole registry is served under.
///
/// # Examples
///
/// ```
/// use routeset_core::http::{FunctionHandler, Request, Response};
/// use routeset_urls::RouteEntry;
/// use std::sync::Arc;
///
/// let handler = Arc::new(FunctionHandler::new(|_req: Request| async { Ok(Response::ok()) }));
/// let route = RouteEntry::new("inspect/{pk}/", handler)
/// 	.with_name("admin_shop_product_inspect")
/// 	.with_prefix("product/");
///
/// assert_eq!(route.full_path("/admin/"), "/admin/product/inspect/{pk}/");
/// ```
#[derive(Clone)]
pub struct RouteEntry {
	pattern: String,
	name: Option<String>,
	prefix: String,
	handler: Arc<dyn Handler>,
}

impl RouteEntry {
	pub fn new(pattern: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
		Self {
			pattern: pattern.into(),
			name: None,
			prefix: String::new(),
			handler,
		}
	}

	pub fn from_handler<H>(pattern: impl Into<String>, handler: H) -> Self
	where
		H: Handler + 'static,
	{
		Self::new(pattern, Arc::new(handler))
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the mount segment; prefixes assigned by a registry always end with `/`
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// `mount + prefix + pattern`
	pub fn full_path(&self, mount: &str) -> String {
		format!("{}{}{}", mount, self.prefix, self.pattern)
	}

	pub fn handler(&self) -> &dyn Handler {
		self.handler.as_ref()
	}
}

/// Equal when pattern, name and prefix match and both point at the same handler
impl PartialEq for RouteEntry {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
			&& self.name == other.name
			&& self.prefix == other.prefix
			&& Arc::ptr_eq(&self.handler, &other.handler)
	}
}

impl fmt::Debug for RouteEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteEntry")
			.field("pattern", &self.pattern)
			.field("name", &self.name)
			.field("prefix", &self.prefix)
			.finish_non_exhaustive()
	}
}
