//! Reverse resolution: route name + parameters to a concrete path.

use crate::pattern::PathPattern;
use parking_lot::RwLock;
use routeset_core::exception::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Name-to-path table
///
/// # Examples
///
/// ```
/// use routeset_urls::UrlReverser;
///
/// let mut reverser = UrlReverser::new();
/// reverser.register_path("admin_shop_product_edit", "/product/edit/{pk}/").unwrap();
///
/// let url = reverser.reverse_with("admin_shop_product_edit", &[("pk", "7")]).unwrap();
/// assert_eq!(url, "/product/edit/7/");
/// ```
#[derive(Debug, Default, Clone)]
pub struct UrlReverser {
	routes: HashMap<String, PathPattern>,
}

impl UrlReverser {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `path` under `name`, replacing any earlier registration
	pub fn register_path(&mut self, name: impl Into<String>, path: impl Into<String>) -> Result<()> {
		let pattern = PathPattern::new(path)?;
		self.routes.insert(name.into(), pattern);
		Ok(())
	}

	fn lookup(&self, name: &str) -> Result<&PathPattern> {
		self.routes
			.get(name)
			.ok_or_else(|| Error::RouteNotFound(format!("{:?} is not a registered route name", name)))
	}

	/// Reverses with named parameters; the set of names must match the pattern exactly
	pub fn reverse(&self, name: &str, params: &HashMap<String, String>) -> Result<String> {
		self.lookup(name)?.substitute(params)
	}

	pub fn reverse_with<S: AsRef<str>>(&self, name: &str, params: &[(S, S)]) -> Result<String> {
		let params: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
			.collect();
		self.reverse(name, &params)
	}

	/// Reverses with values assigned to the placeholders in order
	///
	/// # Examples
	///
	/// ```
	/// use routeset_urls::UrlReverser;
	///
	/// let mut reverser = UrlReverser::new();
	/// reverser.register_path("admin_shop_product_index", "/product/").unwrap();
	///
	/// assert_eq!(reverser.reverse_positional::<&str>("admin_shop_product_index", &[]).unwrap(), "/product/");
	/// assert!(reverser.reverse_positional("admin_shop_product_index", &["1"]).is_err());
	/// ```
	pub fn reverse_positional<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Result<String> {
		let pattern = self.lookup(name)?;
		let expected = pattern.param_names().len();
		if args.len() != expected {
			return Err(Error::RouteNotFound(format!(
				"{:?} takes {} argument(s), {} given",
				name,
				expected,
				args.len()
			)));
		}
		let params: HashMap<String, String> = pattern
			.param_names()
			.iter()
			.cloned()
			.zip(args.iter().map(|a| a.as_ref().to_string()))
			.collect();
		pattern.substitute(&params)
	}

	pub fn has_route(&self, name: &str) -> bool {
		self.routes.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

/// Shared handle to the reverse table a registry publishes
///
/// Helpers hold a clone and read it at resolution time. The registry swaps the
/// whole table each time it rebuilds its routes.
#[derive(Debug, Default, Clone)]
pub struct UrlResolver {
	inner: Arc<RwLock<UrlReverser>>,
}

impl UrlResolver {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn replace(&self, reverser: UrlReverser) {
		debug!(routes = reverser.len(), "replacing reverse table");
		*self.inner.write() = reverser;
	}

	pub fn reverse(&self, name: &str, params: &HashMap<String, String>) -> Result<String> {
		self.inner.read().reverse(name, params)
	}

	pub fn reverse_with<S: AsRef<str>>(&self, name: &str, params: &[(S, S)]) -> Result<String> {
		self.inner.read().reverse_with(name, params)
	}

	pub fn reverse_positional<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Result<String> {
		self.inner.read().reverse_positional(name, args)
	}

	pub fn has_route(&self, name: &str) -> bool {
		self.inner.read().has_route(name)
	}

	/// Whether both handles share one table
	pub fn same_table(&self, other: &UrlResolver) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}
