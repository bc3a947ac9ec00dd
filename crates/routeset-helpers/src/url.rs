//! Route patterns, route names and reversed URLs for one model.

use crate::permission::PermissionHelper;
use once_cell::sync::OnceCell;
use routeset_core::action::Action;
use routeset_core::auth::Actor;
use routeset_core::exception::Result;
use routeset_core::model::{ModelDescriptor, Record};
use routeset_urls::UrlResolver;
use std::fmt::Write as _;

/// Placeholder every instance-scoped pattern uses for the instance key
pub const PK_PARAM: &str = "pk";

/// Escapes every byte outside `[-A-Za-z0-9]` as `_XX`
///
/// The result only holds characters a route token accepts, so any key can
/// travel in a URL segment.
///
/// # Examples
///
/// ```
/// use routeset_helpers::url::{quote, unquote};
///
/// assert_eq!(quote("a_b/c"), "a_5Fb_2Fc");
/// assert_eq!(unquote("a_5Fb_2Fc"), "a_b/c");
/// assert_eq!(quote("ann@example.com"), "ann_40example_2Ecom");
/// assert_eq!(quote("42"), "42");
/// ```
pub fn quote(value: &str) -> String {
	let mut quoted = String::with_capacity(value.len());
	for byte in value.bytes() {
		if byte.is_ascii_alphanumeric() || byte == b'-' {
			quoted.push(char::from(byte));
		} else {
			let _ = write!(quoted, "_{:02X}", byte);
		}
	}
	quoted
}

/// Reverses [`quote`]; `_` not followed by two uppercase hex digits is kept
pub fn unquote(value: &str) -> String {
	let bytes = value.as_bytes();
	let mut out = Vec::with_capacity(bytes.len());
	let mut i = 0;
	while i < bytes.len() {
		if bytes[i] == b'_'
			&& i + 2 < bytes.len()
			&& let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2]))
		{
			out.push(hi << 4 | lo);
			i += 3;
			continue;
		}
		out.push(bytes[i]);
		i += 1;
	}
	String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

fn hex_digit(b: u8) -> Option<u8> {
	match b {
		b'0'..=b'9' => Some(b - b'0'),
		b'A'..=b'F' => Some(b - b'A' + 10),
		_ => None,
	}
}

/// Derives route patterns and names for a model and reverses them
///
/// Names follow `"{namespace}_{app_label}_{model_name}_{action}"`. The index
/// and create URLs are memoized after their first successful resolution.
///
/// # Examples
///
/// ```
/// use routeset_core::{Action, ModelDescriptor};
/// use routeset_helpers::UrlHelper;
/// use routeset_urls::UrlResolver;
///
/// let helper = UrlHelper::new("admin", ModelDescriptor::new("shop", "product"), UrlResolver::new());
/// assert_eq!(helper.name(&Action::Inspect), "admin_shop_product_inspect");
/// assert_eq!(helper.pattern(&Action::Index, false), "");
/// assert_eq!(helper.pattern(&Action::Create, false), "create/");
/// assert_eq!(helper.pattern(&Action::Edit, true), "edit/{pk}/");
/// ```
#[derive(Debug)]
pub struct UrlHelper {
	namespace: String,
	model: ModelDescriptor,
	resolver: UrlResolver,
	index_url: OnceCell<String>,
	create_url: OnceCell<String>,
}

impl UrlHelper {
	pub fn new(namespace: impl Into<String>, model: ModelDescriptor, resolver: UrlResolver) -> Self {
		Self {
			namespace: namespace.into(),
			model,
			resolver,
			index_url: OnceCell::new(),
			create_url: OnceCell::new(),
		}
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn model(&self) -> &ModelDescriptor {
		&self.model
	}

	pub fn resolver(&self) -> &UrlResolver {
		&self.resolver
	}

	/// Route pattern relative to the viewset prefix
	///
	/// `specific` adds the `{pk}` segment. The index pattern without it is empty.
	pub fn pattern(&self, action: &Action, specific: bool) -> String {
		if specific {
			format!("{}/{{{}}}/", action.name(), PK_PARAM)
		} else if *action == Action::Index {
			String::new()
		} else {
			format!("{}/", action.name())
		}
	}

	/// [`pattern`](Self::pattern) with `specific` taken from the action's scope
	pub fn action_pattern(&self, action: &Action) -> String {
		self.pattern(action, action.is_instance_scoped())
	}

	pub fn name(&self, action: &Action) -> String {
		format!(
			"{}_{}_{}_{}",
			self.namespace,
			self.model.app_label(),
			self.model.model_name(),
			action.name()
		)
	}

	/// Reverses the action's route with positional arguments
	///
	/// # Errors
	///
	/// `Error::RouteNotFound` when the name is not registered, the argument count
	/// differs from the pattern's placeholders or a value is not a valid token.
	pub fn url<S: AsRef<str>>(&self, action: &Action, args: &[S]) -> Result<String> {
		self.resolver.reverse_positional(&self.name(action), args)
	}

	/// Reverses the action's route with named arguments
	pub fn url_with<S: AsRef<str>>(&self, action: &Action, params: &[(S, S)]) -> Result<String> {
		self.resolver.reverse_with(&self.name(action), params)
	}

	pub fn index_url(&self) -> Result<String> {
		self.index_url
			.get_or_try_init(|| self.url::<&str>(&Action::Index, &[]))
			.cloned()
	}

	pub fn create_url(&self) -> Result<String> {
		self.create_url
			.get_or_try_init(|| self.url::<&str>(&Action::Create, &[]))
			.cloned()
	}

	/// URL of an instance-scoped action for `pk`, quoting it first
	pub fn object_url(&self, action: &Action, pk: &str) -> Result<String> {
		self.url(action, &[quote(pk)])
	}
}

/// Finds URLs for records an actor may act on
pub struct UrlFinder<'a> {
	url_helper: &'a UrlHelper,
	permission_helper: &'a PermissionHelper,
}

impl<'a> UrlFinder<'a> {
	pub fn new(url_helper: &'a UrlHelper, permission_helper: &'a PermissionHelper) -> Self {
		Self {
			url_helper,
			permission_helper,
		}
	}

	/// The edit URL for `record`, `None` when the actor may not edit it
	pub fn edit_url(&self, actor: &dyn Actor, record: &Record) -> Result<Option<String>> {
		if !self.permission_helper.can(actor, &Action::Edit, Some(record)) {
			return Ok(None);
		}
		self.url_helper
			.object_url(&Action::Edit, record.pk())
			.map(Some)
	}
}
