//! Action buttons for list rows and page headers.

use crate::permission::PermissionHelper;
use crate::url::UrlHelper;
use routeset_core::action::Action;
use routeset_core::auth::Actor;
use routeset_core::exception::Result;
use routeset_core::model::Record;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One rendered button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDescriptor {
	pub url: String,
	pub label: String,
	pub classname: String,
	pub title: String,
}

/// CSS classes per button kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonClassnames {
	pub default: Vec<String>,
	pub add: Vec<String>,
	pub inspect: Vec<String>,
	pub edit: Vec<String>,
	pub delete: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|v| v.to_string()).collect()
}

impl Default for ButtonClassnames {
	fn default() -> Self {
		Self {
			default: strings(&["button"]),
			add: strings(&["bicolor", "icon", "icon-plus"]),
			inspect: Vec::new(),
			edit: Vec::new(),
			delete: strings(&["no"]),
		}
	}
}

impl ButtonClassnames {
	/// Classes specific to `action`; empty for actions without a button
	pub fn for_action(&self, action: &Action) -> &[String] {
		match action {
			Action::Create => &self.add,
			Action::Inspect => &self.inspect,
			Action::Edit => &self.edit,
			Action::Delete => &self.delete,
			Action::Index | Action::Custom { .. } => &[],
		}
	}
}

/// Per-call adjustments to the generated buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonOptions {
	/// Actions to leave out
	pub exclude: Vec<Action>,
	/// Classes appended to every button
	pub classnames_add: Vec<String>,
	/// Classes removed from every button
	pub classnames_exclude: Vec<String>,
}

impl ButtonOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn exclude(mut self, action: Action) -> Self {
		self.exclude.push(action);
		self
	}

	pub fn add_class(mut self, class: impl Into<String>) -> Self {
		self.classnames_add.push(class.into());
		self
	}

	pub fn exclude_class(mut self, class: impl Into<String>) -> Self {
		self.classnames_exclude.push(class.into());
		self
	}
}

/// Builds button descriptors for one model, filtered by permissions
///
/// # Examples
///
/// ```
/// use routeset_core::auth::{ModelBackend, SimpleUser};
/// use routeset_core::{ModelDescriptor, Record};
/// use routeset_helpers::{ButtonHelper, ButtonOptions, PermissionHelper, UrlHelper};
/// use routeset_urls::{UrlResolver, UrlReverser};
/// use std::sync::Arc;
///
/// let mut reverser = UrlReverser::new();
/// reverser.register_path("admin_shop_product_inspect", "/product/inspect/{pk}/").unwrap();
/// reverser.register_path("admin_shop_product_delete", "/product/delete/{pk}/").unwrap();
/// let resolver = UrlResolver::new();
/// resolver.replace(reverser);
///
/// let product = ModelDescriptor::new("shop", "product");
/// let buttons = ButtonHelper::new(
/// 	Arc::new(UrlHelper::new("admin", product.clone(), resolver)),
/// 	Arc::new(PermissionHelper::new(product, Arc::new(ModelBackend))),
/// );
///
/// let user = SimpleUser::new("clerk").with_permission("shop.delete_product");
/// let found = buttons.buttons_for(&user, &Record::new("3"), &ButtonOptions::new()).unwrap();
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].label, "Inspect");
/// assert_eq!(found[1].url, "/product/delete/3/");
/// assert_eq!(found[1].classname, "button no");
/// ```
#[derive(Debug, Clone)]
pub struct ButtonHelper {
	url_helper: Arc<UrlHelper>,
	permission_helper: Arc<PermissionHelper>,
	classnames: ButtonClassnames,
}

impl ButtonHelper {
	/// Instance buttons in the order they are offered
	pub const OBJECT_ACTIONS: [Action; 3] = [Action::Inspect, Action::Edit, Action::Delete];

	pub fn new(url_helper: Arc<UrlHelper>, permission_helper: Arc<PermissionHelper>) -> Self {
		Self {
			url_helper,
			permission_helper,
			classnames: ButtonClassnames::default(),
		}
	}

	pub fn with_classnames(mut self, classnames: ButtonClassnames) -> Self {
		self.classnames = classnames;
		self
	}

	pub fn classnames(&self) -> &ButtonClassnames {
		&self.classnames
	}

	fn verbose_name(&self) -> &str {
		self.url_helper.model().verbose_name()
	}

	/// `default + specific + options.classnames_add`, minus `options.classnames_exclude`
	pub fn finalise_classname(&self, specific: &[String], options: &ButtonOptions) -> String {
		self.classnames
			.default
			.iter()
			.chain(specific)
			.chain(&options.classnames_add)
			.filter(|class| !options.classnames_exclude.contains(class))
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(" ")
	}

	pub fn add_button(&self, options: &ButtonOptions) -> Result<ButtonDescriptor> {
		let verbose_name = self.verbose_name();
		Ok(ButtonDescriptor {
			url: self.url_helper.create_url()?,
			label: format!("Add {}", verbose_name),
			classname: self.finalise_classname(&self.classnames.add, options),
			title: format!("Add a new {}", verbose_name),
		})
	}

	/// Button for an instance-scoped action on the record keyed by `pk`
	pub fn object_button(&self, action: &Action, pk: &str, options: &ButtonOptions) -> Result<ButtonDescriptor> {
		let label = match action {
			Action::Inspect => "Inspect".to_string(),
			Action::Edit => "Edit".to_string(),
			Action::Delete => "Delete".to_string(),
			other => capitalize(other.name()),
		};
		Ok(ButtonDescriptor {
			url: self.url_helper.object_url(action, pk)?,
			title: format!("{} this {}", label, self.verbose_name()),
			classname: self.finalise_classname(self.classnames.for_action(action), options),
			label,
		})
	}

	/// Inspect, edit and delete buttons the actor may use on `record`
	///
	/// # Errors
	///
	/// `Error::RouteNotFound` when a permitted action has no registered route.
	pub fn buttons_for(
		&self,
		actor: &dyn Actor,
		record: &Record,
		options: &ButtonOptions,
	) -> Result<Vec<ButtonDescriptor>> {
		let mut buttons = Vec::new();
		for action in &Self::OBJECT_ACTIONS {
			if options.exclude.contains(action) {
				continue;
			}
			if !self.permission_helper.can(actor, action, Some(record)) {
				continue;
			}
			buttons.push(self.object_button(action, record.pk(), options)?);
		}
		Ok(buttons)
	}
}

fn capitalize(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
