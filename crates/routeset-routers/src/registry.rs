//! The registry: an ordered set of viewsets mounted under one namespace.
//!
//! Routes are computed on first read and cached. Registering a viewset drops
//! the cache; nothing else does.

use crate::index::DefaultIndexView;
use parking_lot::RwLock;
use routeset_conf::RoutesSettings;
use routeset_core::action::Action;
use routeset_core::exception::{Error, Result};
use routeset_core::http::{Handler, Request, Response};
use routeset_core::model::ModelDescriptor;
use routeset_helpers::UrlHelper;
use routeset_urls::{
	HookSupplier, NoHooks, PathPattern, RouteEntry, UrlResolver, UrlReverser, SITE_PATH_HOOK,
	SITE_VIEW_HOOK,
};
use routeset_views::{Context, JsonRenderer, MenuItem, RouterContext, TemplateRenderer, ViewSet};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle of a registry's route list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
	/// Nothing registered, routes never read
	Empty,
	/// Registrations pending; the next read rebuilds routes
	Populated,
	/// Routes built and cached
	Frozen,
}

/// Routes plus the compiled full-path pattern of each
#[derive(Debug)]
struct BuiltRoutes {
	routes: Arc<[RouteEntry]>,
	patterns: Vec<PathPattern>,
}

#[derive(Debug, Default)]
enum RouteCache {
	#[default]
	Unbuilt,
	Built(Arc<BuiltRoutes>),
}

impl RouteCache {
	fn get(&self) -> Option<Arc<BuiltRoutes>> {
		match self {
			RouteCache::Unbuilt => None,
			RouteCache::Built(built) => Some(Arc::clone(built)),
		}
	}

	fn invalidate(&mut self) {
		*self = RouteCache::Unbuilt;
	}

	fn is_built(&self) -> bool {
		matches!(self, RouteCache::Built(_))
	}
}

struct RegistryEntry {
	prefix: String,
	basename: String,
	viewset: Arc<dyn ViewSet>,
}

/// A route matched against a request path
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
	pub route: RouteEntry,
	pub params: HashMap<String, String>,
}

/// Ordered collection of viewsets sharing one namespace
///
/// # Examples
///
/// ```
/// use routeset_core::ModelDescriptor;
/// use routeset_routers::Registry;
/// use routeset_views::ModelViewSet;
///
/// let mut registry = Registry::builder("admin").build().unwrap();
/// let viewset = ModelViewSet::read_only(&registry.context())
/// 	.model(ModelDescriptor::new("shop", "product"))
/// 	.build()
/// 	.unwrap();
/// registry.register(viewset).unwrap();
///
/// let names: Vec<_> = registry
/// 	.urls()
/// 	.unwrap()
/// 	.iter()
/// 	.filter_map(|r| r.name().map(String::from))
/// 	.collect();
/// assert_eq!(names, vec!["admin_index", "admin_shop_product_index", "admin_shop_product_inspect"]);
/// ```
pub struct Registry {
	namespace: String,
	settings: RoutesSettings,
	hooks: Arc<dyn HookSupplier>,
	renderer: Arc<dyn TemplateRenderer>,
	index_view: Option<Arc<dyn Handler>>,
	resolver: UrlResolver,
	entries: Vec<RegistryEntry>,
	cache: RwLock<RouteCache>,
	helpers: RwLock<HashMap<String, Arc<UrlHelper>>>,
}

impl Registry {
	pub fn builder(namespace: impl Into<String>) -> RegistryBuilder {
		RegistryBuilder::new(namespace)
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn settings(&self) -> &RoutesSettings {
		&self.settings
	}

	pub fn resolver(&self) -> &UrlResolver {
		&self.resolver
	}

	/// What viewsets destined for this registry are built from
	pub fn context(&self) -> RouterContext {
		RouterContext::new(self.namespace.clone(), self.resolver.clone())
			.with_mount_path(self.settings.mount_path.clone())
	}

	pub fn state(&self) -> RegistryState {
		if self.cache.read().is_built() {
			RegistryState::Frozen
		} else if self.entries.is_empty() {
			RegistryState::Empty
		} else {
			RegistryState::Populated
		}
	}

	/// Name of the registry's own index route
	pub fn index_name(&self) -> String {
		format!("{}_index", self.namespace)
	}

	/// Registers under the model's name as basename and prefix
	pub fn register<V: ViewSet + 'static>(&mut self, viewset: V) -> Result<()> {
		self.register_with(viewset, None, None)
	}

	/// Registers with an explicit prefix and/or basename
	///
	/// The basename defaults to the model name and the prefix to the basename.
	/// A trailing `/` is added to non-empty prefixes.
	///
	/// # Errors
	///
	/// `Error::Configuration` when the viewset was built for another namespace,
	/// or when it has no model and no basename was given.
	pub fn register_with<V: ViewSet + 'static>(
		&mut self,
		viewset: V,
		prefix: Option<&str>,
		basename: Option<&str>,
	) -> Result<()> {
		self.register_arc(Arc::new(viewset), prefix, basename)
	}

	pub fn register_arc(
		&mut self,
		viewset: Arc<dyn ViewSet>,
		prefix: Option<&str>,
		basename: Option<&str>,
	) -> Result<()> {
		if viewset.namespace() != self.namespace {
			return Err(Error::Configuration(format!(
				"viewset built for namespace {:?} cannot be registered under {:?}",
				viewset.namespace(),
				self.namespace
			)));
		}
		if let Some(helper) = viewset.url_helper()
			&& !helper.resolver().same_table(&self.resolver)
		{
			return Err(Error::Configuration(format!(
				"viewset for {:?} was not built from this registry's context",
				helper.model().slug()
			)));
		}
		if let Some(mount_path) = viewset.mount_path()
			&& mount_path != self.settings.mount_path
		{
			return Err(Error::Configuration(format!(
				"viewset built for mount path {:?} cannot be registered under {:?}",
				mount_path, self.settings.mount_path
			)));
		}

		let basename = match (basename, viewset.model()) {
			(Some(basename), _) => basename.to_string(),
			(None, Some(model)) => model.model_name().to_string(),
			(None, None) => {
				return Err(Error::Configuration(
					"a basename is required for viewsets without a model".to_string(),
				));
			}
		};
		let mut prefix = prefix.unwrap_or(&basename).trim_start_matches('/').to_string();
		if !prefix.is_empty() && !prefix.ends_with('/') {
			prefix.push('/');
		}

		debug!(namespace = %self.namespace, prefix = %prefix, basename = %basename, "registered viewset");
		self.entries.push(RegistryEntry {
			prefix,
			basename,
			viewset,
		});
		self.cache.get_mut().invalidate();
		Ok(())
	}

	/// `(prefix, basename)` of every registration, in order
	pub fn registrations(&self) -> Vec<(String, String)> {
		self.entries
			.iter()
			.map(|e| (e.prefix.clone(), e.basename.clone()))
			.collect()
	}

	/// The flattened route list, built on first call and cached
	///
	/// Order: the index route (when enabled), each registration's routes in
	/// registration order, hooked views, hooked paths.
	///
	/// # Errors
	///
	/// `Error::Configuration` for duplicate route names, unresolvable hooked
	/// views or invalid patterns. Nothing is cached on failure.
	pub fn urls(&self) -> Result<Arc<[RouteEntry]>> {
		Ok(Arc::clone(&self.built()?.routes))
	}

	fn built(&self) -> Result<Arc<BuiltRoutes>> {
		if let Some(built) = self.cache.read().get() {
			return Ok(built);
		}
		let mut cache = self.cache.write();
		if let Some(built) = cache.get() {
			return Ok(built);
		}
		let built = Arc::new(self.build_routes()?);
		*cache = RouteCache::Built(Arc::clone(&built));
		Ok(built)
	}

	fn index_route(&self) -> RouteEntry {
		let handler = match &self.index_view {
			Some(handler) => Arc::clone(handler),
			None => {
				let mut site_context = self.site_context();
				site_context.insert(
					"site_url".into(),
					Value::String(self.settings.mount_path.clone()),
				);
				Arc::new(DefaultIndexView {
					site_context,
					title: self.settings.index_title.clone(),
					template: self.settings.index_template.clone(),
					menu_items: self.menu_items(),
					renderer: Arc::clone(&self.renderer),
				})
			}
		};
		RouteEntry::new("", handler).with_name(self.index_name())
	}

	fn build_routes(&self) -> Result<BuiltRoutes> {
		let mut routes = Vec::new();
		if self.settings.index_enabled {
			routes.push(self.index_route());
		}
		for entry in &self.entries {
			for route in entry.viewset.get_urls()? {
				routes.push(route.with_prefix(entry.prefix.clone()));
			}
		}
		for view in self.hooks.view_hooks(SITE_VIEW_HOOK) {
			routes.push(view.into_route(self.hooks.as_ref())?);
		}
		routes.extend(self.hooks.path_hooks(SITE_PATH_HOOK));

		let mut seen = HashSet::new();
		for name in routes.iter().filter_map(RouteEntry::name) {
			if !seen.insert(name) {
				return Err(Error::Configuration(format!(
					"route name {:?} is used more than once in namespace {:?}",
					name, self.namespace
				)));
			}
		}

		let mount = &self.settings.mount_path;
		let mut reverser = UrlReverser::new();
		let mut patterns = Vec::with_capacity(routes.len());
		for route in &routes {
			let full_path = route.full_path(mount);
			if let Some(name) = route.name() {
				reverser.register_path(name, full_path.clone())?;
			}
			patterns.push(PathPattern::new(full_path)?);
		}
		self.resolver.replace(reverser);

		debug!(namespace = %self.namespace, routes = routes.len(), "built routes");
		Ok(BuiltRoutes {
			routes: routes.into(),
			patterns,
		})
	}

	/// First route whose full path matches `path`
	pub fn resolve(&self, path: &str) -> Result<Option<ResolvedRoute>> {
		let built = self.built()?;
		Ok(built
			.patterns
			.iter()
			.zip(built.routes.iter())
			.find_map(|(pattern, route)| {
				pattern.captures(path).map(|params| ResolvedRoute {
					route: route.clone(),
					params,
				})
			}))
	}

	/// Resolves the request path and invokes the matched handler; 404 when nothing matches
	pub async fn dispatch(&self, mut request: Request) -> Result<Response> {
		let Some(resolved) = self.resolve(&request.path)? else {
			debug!(path = %request.path, "no route matched");
			return Ok(Response::not_found());
		};
		request.path_params = resolved.params;
		resolved.route.handler().handle(request).await
	}

	fn site_context(&self) -> Context {
		let mut context = Context::new();
		context.insert("site_title".into(), Value::String(self.settings.site_title.clone()));
		context.insert("site_header".into(), Value::String(self.settings.site_header.clone()));
		context
	}

	/// `site_title`, `site_header` and `site_url` for templates
	///
	/// `site_url` is the reversed index route, `null` when the index is disabled.
	pub fn each_context(&self) -> Result<Context> {
		self.built()?;
		let mut context = self.site_context();
		let site_url = match self.resolver.reverse_positional::<&str>(&self.index_name(), &[]) {
			Ok(url) => Value::String(url),
			Err(_) => Value::Null,
		};
		context.insert("site_url".into(), site_url);
		Ok(context)
	}

	/// URL helper for any model under this namespace, cached per model
	pub fn url_helper_for(&self, app_label: &str, model_name: &str) -> Arc<UrlHelper> {
		let model = ModelDescriptor::new(app_label, model_name);
		let slug = model.slug();
		if let Some(helper) = self.helpers.read().get(&slug) {
			return Arc::clone(helper);
		}
		let mut helpers = self.helpers.write();
		Arc::clone(helpers.entry(slug).or_insert_with(|| {
			Arc::new(UrlHelper::new(self.namespace.clone(), model, self.resolver.clone()))
		}))
	}

	/// Reverses `action` on `model` with positional arguments
	pub fn object_url<S: AsRef<str>>(
		&self,
		model: &ModelDescriptor,
		action: &Action,
		args: &[S],
	) -> Result<String> {
		self.built()?;
		self.url_helper_for(model.app_label(), model.model_name())
			.url(action, args)
	}

	/// Menu items sorted by order; registration order breaks ties
	pub fn menu_items(&self) -> Vec<MenuItem> {
		let mut items: Vec<MenuItem> = self
			.entries
			.iter()
			.filter_map(|e| e.viewset.menu_item())
			.collect();
		items.sort_by_key(|item| item.order);
		items
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("namespace", &self.namespace)
			.field("state", &self.state())
			.field("registrations", &self.registrations())
			.finish_non_exhaustive()
	}
}

/// Builder for [`Registry`]
pub struct RegistryBuilder {
	namespace: String,
	settings: RoutesSettings,
	hooks: Arc<dyn HookSupplier>,
	renderer: Arc<dyn TemplateRenderer>,
	index_view: Option<Arc<dyn Handler>>,
}

impl RegistryBuilder {
	pub fn new(namespace: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			settings: RoutesSettings::default(),
			hooks: Arc::new(NoHooks),
			renderer: Arc::new(JsonRenderer),
			index_view: None,
		}
	}

	pub fn settings(mut self, settings: RoutesSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn hooks(mut self, hooks: Arc<dyn HookSupplier>) -> Self {
		self.hooks = hooks;
		self
	}

	/// Renderer for the default index view
	pub fn renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
		self.renderer = renderer;
		self
	}

	/// Replaces the default index view
	pub fn index_view<H: Handler + 'static>(mut self, handler: H) -> Self {
		self.index_view = Some(Arc::new(handler));
		self
	}

	/// # Errors
	///
	/// `Error::Configuration` for an empty namespace or invalid settings.
	pub fn build(self) -> Result<Registry> {
		if self.namespace.trim().is_empty() {
			return Err(Error::Configuration("registry namespace must not be empty".to_string()));
		}
		self.settings.validate()?;
		if !self.settings.index_enabled && self.index_view.is_some() {
			warn!(namespace = %self.namespace, "index view given while the index route is disabled");
		}

		Ok(Registry {
			namespace: self.namespace,
			settings: self.settings,
			hooks: self.hooks,
			renderer: self.renderer,
			index_view: self.index_view,
			resolver: UrlResolver::new(),
			entries: Vec::new(),
			cache: RwLock::new(RouteCache::Unbuilt),
			helpers: RwLock::new(HashMap::new()),
		})
	}
}
