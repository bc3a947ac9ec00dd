//! Request handlers bound by the built-in capabilities.

use crate::templates::Context;
use crate::viewset::{title_case, ViewSetCore};
use async_trait::async_trait;
use http::Method;
use routeset_core::action::Action;
use routeset_core::exception::{Error, Result};
use routeset_core::http::{Handler, Request, Response};
use routeset_core::messages::Message;
use routeset_core::model::{ModelDescriptor, Record};
use routeset_helpers::url::{unquote, PK_PARAM};
use routeset_helpers::{ButtonHelper, ButtonOptions};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

fn capfirst(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn model_context(model: &ModelDescriptor) -> Value {
	json!({
		"app_label": model.app_label(),
		"model_name": model.model_name(),
		"verbose_name": model.verbose_name(),
		"verbose_name_plural": model.verbose_name_plural(),
	})
}

fn base_context(core: &ViewSetCore, title: String, request: &Request) -> Context {
	let mut context = Context::new();
	context.insert("title".into(), Value::String(title));
	context.insert("model".into(), model_context(core.model()));
	context.insert(
		"messages".into(),
		serde_json::to_value(request.messages.drain()).unwrap_or(Value::Null),
	);
	context
}

fn render(core: &ViewSetCore, template: Option<&String>, action: &Action, context: Context) -> Result<Response> {
	let candidates = match template {
		Some(template) => vec![template.clone()],
		None => core.template_candidates(action),
	};
	let renderer = core.renderer();
	let body = renderer.render(&candidates, &context)?;
	Ok(Response::ok()
		.with_content_type(renderer.content_type())
		.with_body(body))
}

/// Unquoted instance key captured by the route
fn captured_pk(request: &Request) -> Option<String> {
	request.path_param(PK_PARAM).map(unquote)
}

/// Leaves out instance buttons whose action has no registered route
fn routed_button_options(core: &ViewSetCore) -> ButtonOptions {
	let url_helper = core.url_helper();
	ButtonHelper::OBJECT_ACTIONS
		.iter()
		.filter(|action| !url_helper.resolver().has_route(&url_helper.name(action)))
		.fold(ButtonOptions::new(), |options, action| options.exclude(action.clone()))
}

/// Lists a model's records with per-record buttons
pub struct IndexView {
	pub(crate) core: Arc<ViewSetCore>,
	pub(crate) title: Option<String>,
	pub(crate) ordering: Vec<String>,
	pub(crate) list_display: Vec<String>,
	pub(crate) template: Option<String>,
}

impl IndexView {
	fn title(&self) -> String {
		self.title
			.clone()
			.unwrap_or_else(|| title_case(self.core.model().verbose_name_plural()))
	}

	fn fields(&self, record: &Record) -> Map<String, Value> {
		if self.list_display.is_empty() {
			record.fields().clone()
		} else {
			record.select(&self.list_display)
		}
	}
}

#[async_trait]
impl Handler for IndexView {
	async fn handle(&self, request: Request) -> Result<Response> {
		if request.method != Method::GET {
			return Ok(Response::method_not_allowed());
		}
		let actor = request.actor();
		let permissions = self.core.permission_helper();
		if !permissions.can_list(actor) {
			return Ok(Response::forbidden());
		}

		let records = self
			.core
			.store()
			.list(self.core.model(), &self.ordering)
			.await?;
		let buttons = self.core.button_helper();
		let options = routed_button_options(&self.core);

		let mut objects = Vec::with_capacity(records.len());
		for record in &records {
			objects.push(json!({
				"pk": record.pk(),
				"fields": self.fields(record),
				"buttons": buttons.buttons_for(actor, record, &options)?,
			}));
		}

		let url_helper = self.core.url_helper();
		let add_button = if permissions.can_create(actor)
			&& url_helper.resolver().has_route(&url_helper.name(&Action::Create))
		{
			Some(buttons.add_button(&options)?)
		} else {
			None
		};

		let mut context = base_context(&self.core, self.title(), &request);
		context.insert("objects".into(), Value::Array(objects));
		context.insert("add_button".into(), serde_json::to_value(add_button)?);
		render(&self.core, self.template.as_ref(), &Action::Index, context)
	}
}

/// Shows one record
pub struct InspectView {
	pub(crate) core: Arc<ViewSetCore>,
	pub(crate) title: Option<String>,
	pub(crate) fields: Vec<String>,
	pub(crate) fields_exclude: Vec<String>,
	pub(crate) template: Option<String>,
}

impl InspectView {
	fn title(&self) -> String {
		self.title
			.clone()
			.unwrap_or_else(|| format!("{} Detail", title_case(self.core.model().verbose_name())))
	}

	fn fields(&self, record: &Record) -> Map<String, Value> {
		if !self.fields.is_empty() {
			return record.select(&self.fields);
		}
		record
			.fields()
			.iter()
			.filter(|(name, _)| !self.fields_exclude.contains(name))
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect()
	}
}

#[async_trait]
impl Handler for InspectView {
	async fn handle(&self, request: Request) -> Result<Response> {
		if request.method != Method::GET {
			return Ok(Response::method_not_allowed());
		}
		let Some(pk) = captured_pk(&request) else {
			return Ok(Response::not_found());
		};
		let actor = request.actor();
		let permissions = self.core.permission_helper();
		if !permissions.can(actor, &Action::Inspect, None) {
			return Ok(Response::forbidden());
		}
		let Some(record) = self.core.store().get(self.core.model(), &pk).await? else {
			return Ok(Response::not_found());
		};
		if !permissions.can_inspect(actor, &record) {
			return Ok(Response::forbidden());
		}

		let options = routed_button_options(&self.core).exclude(Action::Inspect);
		let buttons = self.core.button_helper().buttons_for(actor, &record, &options)?;

		let mut context = base_context(&self.core, self.title(), &request);
		context.insert(
			"object".into(),
			json!({ "pk": record.pk(), "fields": self.fields(&record) }),
		);
		context.insert("buttons".into(), serde_json::to_value(buttons)?);
		render(&self.core, self.template.as_ref(), &Action::Inspect, context)
	}
}

/// Confirms on GET, deletes on POST
///
/// Every POST outcome other than "forbidden" and "missing" ends in a redirect
/// with exactly one message: success, or the store's failure.
pub struct DeleteView {
	pub(crate) core: Arc<ViewSetCore>,
	pub(crate) title: Option<String>,
	pub(crate) template: Option<String>,
}

impl DeleteView {
	fn title(&self) -> String {
		self.title
			.clone()
			.unwrap_or_else(|| format!("Delete {}", self.core.model().verbose_name()))
	}

	/// The index URL, or the mount root when the viewset has no index route
	fn redirect_target(&self) -> String {
		match self.core.url_helper().index_url() {
			Ok(url) => url,
			Err(err) => {
				warn!(
					model = %self.core.model().slug(),
					error = %err,
					"no index route to return to, redirecting to the mount root"
				);
				self.core.mount_path().to_string()
			}
		}
	}

	/// Logs `err`, queues one error message and returns to the index
	fn fail(&self, request: &Request, pk: &str, err: &Error) -> Response {
		let model = self.core.model();
		error!(model = %model.slug(), pk = %pk, error = %err, "failed to delete record");
		request.messages.add(Message::error(format!(
			"{} '{}' could not be deleted.",
			capfirst(model.verbose_name()),
			pk
		)));
		Response::redirect(self.redirect_target())
	}

	async fn confirm(&self, request: Request, pk: String) -> Result<Response> {
		let Some(record) = self.core.store().get(self.core.model(), &pk).await? else {
			return Ok(Response::not_found());
		};
		if !self.core.permission_helper().can_delete(request.actor(), &record) {
			return Ok(Response::forbidden());
		}
		let mut context = base_context(&self.core, self.title(), &request);
		context.insert(
			"object".into(),
			json!({ "pk": record.pk(), "fields": record.fields() }),
		);
		context.insert("cancel_url".into(), Value::String(self.redirect_target()));
		render(&self.core, self.template.as_ref(), &Action::Delete, context)
	}

	async fn delete(&self, request: Request, pk: String) -> Result<Response> {
		let model = self.core.model();
		let record = match self.core.store().get(model, &pk).await {
			Ok(Some(record)) => record,
			Ok(None) => return Ok(Response::not_found()),
			Err(err) => return Ok(self.fail(&request, &pk, &err)),
		};
		if !self.core.permission_helper().can_delete(request.actor(), &record) {
			return Ok(Response::forbidden());
		}

		if let Err(err) = self.core.store().delete(model, &pk).await {
			return Ok(self.fail(&request, &pk, &err));
		}
		debug!(model = %model.slug(), pk = %pk, user = request.actor().username(), "deleted record");
		request.messages.add(Message::success(format!(
			"{} '{}' deleted.",
			capfirst(model.verbose_name()),
			pk
		)));
		Ok(Response::redirect(self.redirect_target()))
	}
}

#[async_trait]
impl Handler for DeleteView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let Some(pk) = captured_pk(&request) else {
			return Ok(Response::not_found());
		};
		if !self
			.core
			.permission_helper()
			.can(request.actor(), &Action::Delete, None)
		{
			return Ok(Response::forbidden());
		}

		match request.method {
			Method::GET => self.confirm(request, pk).await,
			Method::POST => self.delete(request, pk).await,
			_ => Ok(Response::method_not_allowed()),
		}
	}
}
