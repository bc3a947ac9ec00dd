//! Units of behaviour a [`ModelViewSet`](crate::ModelViewSet) is assembled from.
//!
//! Each capability contributes the routes for one action. A viewset's route
//! list is the concatenation of its capabilities' routes in the order they
//! were added.

use crate::views::{DeleteView, IndexView, InspectView};
use crate::viewset::ViewSetCore;
use routeset_core::action::Action;
use routeset_core::exception::{Error, Result};
use routeset_core::http::Handler;
use routeset_urls::RouteEntry;
use std::sync::Arc;

pub trait Capability: Send + Sync {
	/// The action this capability serves
	fn action(&self) -> Action;

	fn routes(&self, core: &Arc<ViewSetCore>) -> Result<Vec<RouteEntry>>;
}

/// Index route listing every record
#[derive(Debug, Clone)]
pub struct ListCapability {
	title: Option<String>,
	ordering: Vec<String>,
	list_display: Vec<String>,
	template: Option<String>,
}

impl Default for ListCapability {
	fn default() -> Self {
		Self {
			title: None,
			ordering: vec!["pk".to_string()],
			list_display: Vec::new(),
			template: None,
		}
	}
}

impl ListCapability {
	pub fn new() -> Self {
		Self::default()
	}

	/// Page title; defaults to the title-cased plural verbose name
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Field names, `-` prefixed for descending; defaults to `["pk"]`
	pub fn ordering<I, S>(mut self, ordering: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.ordering = ordering.into_iter().map(Into::into).collect();
		self
	}

	/// Fields shown per row; empty shows all of them
	pub fn list_display<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.list_display = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Template used instead of the candidate list
	pub fn template(mut self, template: impl Into<String>) -> Self {
		self.template = Some(template.into());
		self
	}
}

impl Capability for ListCapability {
	fn action(&self) -> Action {
		Action::Index
	}

	fn routes(&self, core: &Arc<ViewSetCore>) -> Result<Vec<RouteEntry>> {
		let view = IndexView {
			core: Arc::clone(core),
			title: self.title.clone(),
			ordering: self.ordering.clone(),
			list_display: self.list_display.clone(),
			template: self.template.clone(),
		};
		Ok(vec![core.route(&Action::Index, Arc::new(view))])
	}
}

/// Instance route showing one record
#[derive(Debug, Clone, Default)]
pub struct InspectCapability {
	title: Option<String>,
	fields: Vec<String>,
	fields_exclude: Vec<String>,
	template: Option<String>,
}

impl InspectCapability {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Fields to show, in order; empty shows every field not excluded
	pub fn fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Fields left out when no explicit field list is given
	pub fn fields_exclude<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields_exclude = fields.into_iter().map(Into::into).collect();
		self
	}

	pub fn template(mut self, template: impl Into<String>) -> Self {
		self.template = Some(template.into());
		self
	}
}

impl Capability for InspectCapability {
	fn action(&self) -> Action {
		Action::Inspect
	}

	fn routes(&self, core: &Arc<ViewSetCore>) -> Result<Vec<RouteEntry>> {
		let view = InspectView {
			core: Arc::clone(core),
			title: self.title.clone(),
			fields: self.fields.clone(),
			fields_exclude: self.fields_exclude.clone(),
			template: self.template.clone(),
		};
		Ok(vec![core.route(&Action::Inspect, Arc::new(view))])
	}
}

/// Instance route confirming and performing deletion
#[derive(Debug, Clone, Default)]
pub struct DeleteCapability {
	title: Option<String>,
	template: Option<String>,
}

impl DeleteCapability {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn template(mut self, template: impl Into<String>) -> Self {
		self.template = Some(template.into());
		self
	}
}

impl Capability for DeleteCapability {
	fn action(&self) -> Action {
		Action::Delete
	}

	fn routes(&self, core: &Arc<ViewSetCore>) -> Result<Vec<RouteEntry>> {
		let view = DeleteView {
			core: Arc::clone(core),
			title: self.title.clone(),
			template: self.template.clone(),
		};
		Ok(vec![core.route(&Action::Delete, Arc::new(view))])
	}
}

/// Any other action served by a handler of the caller's choosing
///
/// The pattern follows the action's scope: `"{action}/"` or `"{action}/{pk}/"`.
///
/// # Examples
///
/// ```
/// use routeset_core::http::{FunctionHandler, Request, Response};
/// use routeset_core::{Action, ModelDescriptor};
/// use routeset_urls::UrlResolver;
/// use routeset_views::{ActionCapability, ModelViewSet, RouterContext, ViewSet};
///
/// let context = RouterContext::new("admin", UrlResolver::new());
/// let viewset = ModelViewSet::builder(&context)
/// 	.model(ModelDescriptor::new("shop", "product"))
/// 	.capability(ActionCapability::new(
/// 		Action::custom("publish", true),
/// 		FunctionHandler::new(|_req: Request| async { Ok(Response::ok()) }),
/// 	))
/// 	.build()
/// 	.unwrap();
///
/// let routes = viewset.get_urls().unwrap();
/// assert_eq!(routes[0].pattern(), "publish/{pk}/");
/// assert_eq!(routes[0].name(), Some("admin_shop_product_publish"));
/// ```
#[derive(Clone)]
pub struct ActionCapability {
	action: Action,
	handler: Arc<dyn Handler>,
}

impl ActionCapability {
	pub fn new<H: Handler + 'static>(action: Action, handler: H) -> Self {
		Self::from_arc(action, Arc::new(handler))
	}

	pub fn from_arc(action: Action, handler: Arc<dyn Handler>) -> Self {
		Self { action, handler }
	}
}

impl Capability for ActionCapability {
	fn action(&self) -> Action {
		self.action.clone()
	}

	fn routes(&self, core: &Arc<ViewSetCore>) -> Result<Vec<RouteEntry>> {
		if matches!(self.action, Action::Custom { ref name, .. } if name.is_empty() || name.contains('/')) {
			return Err(Error::Configuration(format!(
				"{:?} is not a usable action name",
				self.action.name()
			)));
		}
		Ok(vec![core.route(&self.action, Arc::clone(&self.handler))])
	}
}
