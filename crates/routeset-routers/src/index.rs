use async_trait::async_trait;
use http::Method;
use routeset_core::exception::Result;
use routeset_core::http::{Handler, Request, Response};
use routeset_views::{Context, MenuItem, TemplateRenderer};
use serde_json::Value;
use std::sync::Arc;

/// Landing page of a registry
///
/// Renders the configured index template with the site context, the index
/// title and the registry's menu as it stood when routes were built.
pub struct DefaultIndexView {
	pub(crate) site_context: Context,
	pub(crate) title: String,
	pub(crate) template: String,
	pub(crate) menu_items: Vec<MenuItem>,
	pub(crate) renderer: Arc<dyn TemplateRenderer>,
}

#[async_trait]
impl Handler for DefaultIndexView {
	async fn handle(&self, request: Request) -> Result<Response> {
		if request.method != Method::GET {
			return Ok(Response::method_not_allowed());
		}
		let mut context = self.site_context.clone();
		context.insert("title".into(), Value::String(self.title.clone()));
		context.insert("menu_items".into(), serde_json::to_value(&self.menu_items)?);
		context.insert(
			"messages".into(),
			serde_json::to_value(request.messages.drain())?,
		);

		let body = self
			.renderer
			.render(std::slice::from_ref(&self.template), &context)?;
		Ok(Response::ok()
			.with_content_type(self.renderer.content_type())
			.with_body(body))
	}
}
