//! Template selection and the renderer interface.

use routeset_core::action::Action;
use routeset_core::exception::{Error, Result};
use routeset_core::model::ModelDescriptor;
use serde_json::{json, Map, Value};

/// Values handed to a template
pub type Context = Map<String, Value>;

/// Templates to try for `action`, most specific first
///
/// # Examples
///
/// ```
/// use routeset_core::{Action, ModelDescriptor};
/// use routeset_views::templates::template_candidates;
///
/// let candidates = template_candidates("admin", &ModelDescriptor::new("shop", "product"), &Action::Index);
/// assert_eq!(candidates, vec![
/// 	"admin/shop/product/index.html",
/// 	"admin/product/index.html",
/// 	"admin/index.html",
/// ]);
/// ```
pub fn template_candidates(namespace: &str, model: &ModelDescriptor, action: &Action) -> Vec<String> {
	let action = action.name();
	vec![
		format!("{}/{}/{}/{}.html", namespace, model.app_label(), model.model_name(), action),
		format!("{}/{}/{}.html", namespace, model.model_name(), action),
		format!("{}/{}.html", namespace, action),
	]
}

/// Renders one of several candidate templates
///
/// Implementations pick the first candidate they can load.
pub trait TemplateRenderer: Send + Sync {
	fn render(&self, candidates: &[String], context: &Context) -> Result<String>;

	/// Content type of the rendered output
	fn content_type(&self) -> &'static str {
		"text/html; charset=utf-8"
	}
}

/// Renders the chosen template name and its context as JSON
///
/// Stands in for a real template engine in tests and API-only deployments.
///
/// # Examples
///
/// ```
/// use routeset_views::templates::{Context, JsonRenderer, TemplateRenderer};
/// use serde_json::{json, Value};
///
/// let mut context = Context::new();
/// context.insert("title".into(), json!("Products"));
///
/// let body = JsonRenderer.render(&["admin/index.html".to_string()], &context).unwrap();
/// let value: Value = serde_json::from_str(&body).unwrap();
/// assert_eq!(value["template"], "admin/index.html");
/// assert_eq!(value["context"]["title"], "Products");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl TemplateRenderer for JsonRenderer {
	fn render(&self, candidates: &[String], context: &Context) -> Result<String> {
		let template = candidates
			.first()
			.ok_or_else(|| Error::Template("no template candidates".to_string()))?;
		Ok(serde_json::to_string(&json!({
			"template": template,
			"context": context,
		}))?)
	}

	fn content_type(&self) -> &'static str {
		"application/json"
	}
}
