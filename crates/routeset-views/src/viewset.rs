//! Viewsets: a model bound to its helpers plus the capabilities that turn it into routes.

use crate::capabilities::{Capability, InspectCapability, ListCapability};
use crate::templates::{template_candidates, JsonRenderer, TemplateRenderer};
use routeset_core::action::Action;
use routeset_core::auth::{ModelBackend, PermissionBackend};
use routeset_core::exception::{Error, Result};
use routeset_core::model::ModelDescriptor;
use routeset_core::store::{InMemoryStore, ModelStore};
use routeset_helpers::{ButtonClassnames, ButtonHelper, PermissionHelper, UrlHelper};
use routeset_urls::{RouteEntry, UrlResolver};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Default position of a menu item
pub const DEFAULT_MENU_ORDER: u32 = 999;

/// What a registry hands to the viewsets it will hold
#[derive(Debug, Clone)]
pub struct RouterContext {
	namespace: String,
	resolver: UrlResolver,
	mount_path: String,
}

impl RouterContext {
	pub fn new(namespace: impl Into<String>, resolver: UrlResolver) -> Self {
		Self {
			namespace: namespace.into(),
			resolver,
			mount_path: "/".to_string(),
		}
	}

	pub fn with_mount_path(mut self, mount_path: impl Into<String>) -> Self {
		self.mount_path = mount_path.into();
		self
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn resolver(&self) -> &UrlResolver {
		&self.resolver
	}

	pub fn mount_path(&self) -> &str {
		&self.mount_path
	}
}

/// Navigation entry for a viewset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
	pub label: String,
	pub icon: Option<String>,
	pub order: u32,
}

/// Uppercases the first letter of every space-separated word
///
/// # Examples
///
/// ```
/// use routeset_views::viewset::title_case;
///
/// assert_eq!(title_case("gift cards"), "Gift Cards");
/// ```
pub fn title_case(value: &str) -> String {
	value
		.split(' ')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}

/// A source of routes a registry can mount
pub trait ViewSet: Send + Sync {
	/// Namespace the viewset's route names were derived under
	fn namespace(&self) -> &str;

	/// The bound model; `None` for viewsets not tied to one
	fn model(&self) -> Option<&ModelDescriptor>;

	/// Routes relative to the viewset's prefix
	fn get_urls(&self) -> Result<Vec<RouteEntry>>;

	fn menu_item(&self) -> Option<MenuItem> {
		None
	}

	fn url_helper(&self) -> Option<&UrlHelper> {
		None
	}

	/// Mount path of the context the viewset was built from
	fn mount_path(&self) -> Option<&str> {
		None
	}
}

/// Everything a model viewset's views share
pub struct ViewSetCore {
	namespace: String,
	mount_path: String,
	url_helper: Arc<UrlHelper>,
	permission_helper: Arc<PermissionHelper>,
	button_classnames: ButtonClassnames,
	store: Arc<dyn ModelStore>,
	renderer: Arc<dyn TemplateRenderer>,
}

impl ViewSetCore {
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Root of the registry; the redirect target of last resort
	pub fn mount_path(&self) -> &str {
		&self.mount_path
	}

	pub fn model(&self) -> &ModelDescriptor {
		self.url_helper.model()
	}

	pub fn url_helper(&self) -> &Arc<UrlHelper> {
		&self.url_helper
	}

	pub fn permission_helper(&self) -> &Arc<PermissionHelper> {
		&self.permission_helper
	}

	pub fn button_helper(&self) -> ButtonHelper {
		ButtonHelper::new(
			Arc::clone(&self.url_helper),
			Arc::clone(&self.permission_helper),
		)
		.with_classnames(self.button_classnames.clone())
	}

	pub fn store(&self) -> &dyn ModelStore {
		self.store.as_ref()
	}

	pub fn renderer(&self) -> &dyn TemplateRenderer {
		self.renderer.as_ref()
	}

	pub fn template_candidates(&self, action: &Action) -> Vec<String> {
		template_candidates(&self.namespace, self.model(), action)
	}

	/// A route for `action` named and patterned by the URL helper
	pub fn route(&self, action: &Action, handler: Arc<dyn routeset_core::http::Handler>) -> RouteEntry {
		RouteEntry::new(self.url_helper.action_pattern(action), handler)
			.with_name(self.url_helper.name(action))
	}
}

impl fmt::Debug for ViewSetCore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewSetCore")
			.field("namespace", &self.namespace)
			.field("model", &self.model().slug())
			.field("mount_path", &self.mount_path)
			.finish_non_exhaustive()
	}
}

/// A viewset over one model, assembled from capabilities
///
/// # Examples
///
/// ```
/// use routeset_core::ModelDescriptor;
/// use routeset_urls::UrlResolver;
/// use routeset_views::{ModelViewSet, RouterContext, ViewSet};
///
/// let context = RouterContext::new("admin", UrlResolver::new());
/// let viewset = ModelViewSet::read_only(&context)
/// 	.model(ModelDescriptor::new("shop", "product"))
/// 	.build()
/// 	.unwrap();
///
/// let names: Vec<_> = viewset
/// 	.get_urls()
/// 	.unwrap()
/// 	.iter()
/// 	.map(|route| route.name().unwrap_or_default().to_string())
/// 	.collect();
/// assert_eq!(names, vec!["admin_shop_product_index", "admin_shop_product_inspect"]);
/// ```
pub struct ModelViewSet {
	core: Arc<ViewSetCore>,
	capabilities: Vec<Box<dyn Capability>>,
	menu_item: MenuItem,
	success_url_name: String,
}

impl ModelViewSet {
	pub fn builder(context: &RouterContext) -> ModelViewSetBuilder {
		ModelViewSetBuilder::new(context)
	}

	/// Builder preset with listing then inspection
	pub fn read_only(context: &RouterContext) -> ModelViewSetBuilder {
		Self::builder(context)
			.capability(ListCapability::new())
			.capability(InspectCapability::new())
	}

	pub fn core(&self) -> &Arc<ViewSetCore> {
		&self.core
	}

	pub fn permission_helper(&self) -> &PermissionHelper {
		&self.core.permission_helper
	}

	pub fn button_helper(&self) -> ButtonHelper {
		self.core.button_helper()
	}

	/// Actions the capabilities provide, in composition order
	pub fn actions(&self) -> Vec<Action> {
		self.capabilities.iter().map(|c| c.action()).collect()
	}

	pub fn has_action(&self, action: &Action) -> bool {
		self.capabilities.iter().any(|c| c.action() == *action)
	}

	pub fn template_candidates(&self, action: &Action) -> Vec<String> {
		self.core.template_candidates(action)
	}

	/// Where to go after a successful form submission
	///
	/// # Errors
	///
	/// `Error::Configuration` when the success route name is not one of
	/// `index`, `create`, `edit` or `inspect`, or when `edit`/`inspect` is
	/// configured without a `pk`. Reverse failures surface as `RouteNotFound`.
	pub fn success_url(&self, pk: Option<&str>) -> Result<String> {
		let url_helper = &self.core.url_helper;
		match (self.success_url_name.as_str(), pk) {
			("index", _) => url_helper.index_url(),
			("create", _) => url_helper.create_url(),
			(name @ ("edit" | "inspect"), Some(pk)) => {
				url_helper.object_url(&Action::from_name(name), pk)
			}
			(name @ ("edit" | "inspect"), None) => Err(Error::Configuration(format!(
				"success_url_name `{}` needs a pk",
				name
			))),
			(other, _) => Err(Error::Configuration(format!(
				"success_url_name must be `index`, `create`, `edit` or `inspect`, got `{}`",
				other
			))),
		}
	}
}

impl ViewSet for ModelViewSet {
	fn namespace(&self) -> &str {
		&self.core.namespace
	}

	fn model(&self) -> Option<&ModelDescriptor> {
		Some(self.core.model())
	}

	fn get_urls(&self) -> Result<Vec<RouteEntry>> {
		self.capabilities
			.iter()
			.try_fold(Vec::new(), |mut routes, capability| {
				routes.extend(capability.routes(&self.core)?);
				Ok(routes)
			})
	}

	fn menu_item(&self) -> Option<MenuItem> {
		Some(self.menu_item.clone())
	}

	fn url_helper(&self) -> Option<&UrlHelper> {
		Some(&self.core.url_helper)
	}

	fn mount_path(&self) -> Option<&str> {
		Some(self.core.mount_path())
	}
}

impl fmt::Debug for ModelViewSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelViewSet")
			.field("core", &self.core)
			.field("actions", &self.actions())
			.field("menu_item", &self.menu_item)
			.finish()
	}
}

/// Builder for [`ModelViewSet`]
///
/// Collaborators default to [`ModelBackend`], an empty [`InMemoryStore`] and
/// [`JsonRenderer`].
pub struct ModelViewSetBuilder {
	namespace: String,
	resolver: UrlResolver,
	mount_path: String,
	model: Option<ModelDescriptor>,
	backend: Arc<dyn PermissionBackend>,
	store: Option<Arc<dyn ModelStore>>,
	renderer: Arc<dyn TemplateRenderer>,
	capabilities: Vec<Box<dyn Capability>>,
	inspect_public: bool,
	button_classnames: ButtonClassnames,
	menu_label: Option<String>,
	menu_icon: Option<String>,
	menu_order: Option<u32>,
	success_url_name: String,
}

impl ModelViewSetBuilder {
	pub fn new(context: &RouterContext) -> Self {
		Self {
			namespace: context.namespace.clone(),
			resolver: context.resolver.clone(),
			mount_path: context.mount_path.clone(),
			model: None,
			backend: Arc::new(ModelBackend),
			store: None,
			renderer: Arc::new(JsonRenderer),
			capabilities: Vec::new(),
			inspect_public: false,
			button_classnames: ButtonClassnames::default(),
			menu_label: None,
			menu_icon: None,
			menu_order: None,
			success_url_name: "index".to_string(),
		}
	}

	pub fn model(mut self, model: ModelDescriptor) -> Self {
		self.model = Some(model);
		self
	}

	pub fn permission_backend(mut self, backend: Arc<dyn PermissionBackend>) -> Self {
		self.backend = backend;
		self
	}

	pub fn store(mut self, store: Arc<dyn ModelStore>) -> Self {
		self.store = Some(store);
		self
	}

	pub fn renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
		self.renderer = renderer;
		self
	}

	/// Appends a capability; routes follow the order capabilities are added in
	pub fn capability<C: Capability + 'static>(mut self, capability: C) -> Self {
		self.capabilities.push(Box::new(capability));
		self
	}

	pub fn inspect_public(mut self, public: bool) -> Self {
		self.inspect_public = public;
		self
	}

	pub fn button_classnames(mut self, classnames: ButtonClassnames) -> Self {
		self.button_classnames = classnames;
		self
	}

	pub fn menu_label(mut self, label: impl Into<String>) -> Self {
		self.menu_label = Some(label.into());
		self
	}

	pub fn menu_icon(mut self, icon: impl Into<String>) -> Self {
		self.menu_icon = Some(icon.into());
		self
	}

	pub fn menu_order(mut self, order: u32) -> Self {
		self.menu_order = Some(order);
		self
	}

	pub fn success_url_name(mut self, name: impl Into<String>) -> Self {
		self.success_url_name = name.into();
		self
	}

	/// # Errors
	///
	/// `Error::Configuration` when no model was set.
	pub fn build(self) -> Result<ModelViewSet> {
		let model = self.model.ok_or_else(|| {
			Error::Configuration(
				"a model viewset needs a model; call `.model(..)` before `.build()`".to_string(),
			)
		})?;

		let url_helper = Arc::new(UrlHelper::new(
			self.namespace.clone(),
			model.clone(),
			self.resolver,
		));
		let permission_helper = Arc::new(
			PermissionHelper::new(model.clone(), self.backend).with_inspect_public(self.inspect_public),
		);
		let menu_item = MenuItem {
			label: self
				.menu_label
				.unwrap_or_else(|| title_case(model.verbose_name_plural())),
			icon: self.menu_icon,
			order: self.menu_order.unwrap_or(DEFAULT_MENU_ORDER),
		};
		let store = self
			.store
			.unwrap_or_else(|| Arc::new(InMemoryStore::new()));

		tracing::debug!(
			namespace = %self.namespace,
			model = %model.slug(),
			capabilities = self.capabilities.len(),
			"built model viewset"
		);

		Ok(ModelViewSet {
			core: Arc::new(ViewSetCore {
				namespace: self.namespace,
				mount_path: self.mount_path,
				url_helper,
				permission_helper,
				button_classnames: self.button_classnames,
				store,
				renderer: self.renderer,
			}),
			capabilities: self.capabilities,
			menu_item,
			success_url_name: self.success_url_name,
		})
	}
}
