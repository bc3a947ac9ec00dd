//! Model metadata and persisted records.
//!
//! A [`ModelDescriptor`] plays the part of an ORM's model options: it names the
//! app and the model, and says which field holds the primary key. routeset only
//! ever reads it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only metadata describing a persisted entity type
///
/// # Examples
///
/// ```
/// use routeset_core::model::ModelDescriptor;
///
/// let product = ModelDescriptor::new("Shop", "Product");
/// assert_eq!(product.app_label(), "shop");
/// assert_eq!(product.model_name(), "product");
/// assert_eq!(product.pk_field(), "id");
/// assert_eq!(product.verbose_name_plural(), "products");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelDescriptor {
	app_label: String,
	model_name: String,
	pk_field: String,
	verbose_name: String,
	verbose_name_plural: String,
}

impl ModelDescriptor {
	/// Creates a descriptor; both labels are lowercased.
	pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
		let app_label = app_label.into().to_lowercase();
		let model_name = model_name.into().to_lowercase();
		let verbose_name = model_name.replace('_', " ");
		let verbose_name_plural = format!("{}s", verbose_name);
		Self {
			app_label,
			model_name,
			pk_field: "id".to_string(),
			verbose_name,
			verbose_name_plural,
		}
	}

	/// Sets the name of the primary-key field
	pub fn with_pk_field(mut self, field: impl Into<String>) -> Self {
		self.pk_field = field.into();
		self
	}

	pub fn with_verbose_name(mut self, name: impl Into<String>) -> Self {
		self.verbose_name = name.into();
		self
	}

	pub fn with_verbose_name_plural(mut self, name: impl Into<String>) -> Self {
		self.verbose_name_plural = name.into();
		self
	}

	pub fn app_label(&self) -> &str {
		&self.app_label
	}

	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	pub fn pk_field(&self) -> &str {
		&self.pk_field
	}

	pub fn verbose_name(&self) -> &str {
		&self.verbose_name
	}

	pub fn verbose_name_plural(&self) -> &str {
		&self.verbose_name_plural
	}

	/// `"{app_label}_{model_name}"`, used to key per-model caches
	///
	/// # Examples
	///
	/// ```
	/// use routeset_core::model::ModelDescriptor;
	///
	/// assert_eq!(ModelDescriptor::new("shop", "product").slug(), "shop_product");
	/// ```
	pub fn slug(&self) -> String {
		format!("{}_{}", self.app_label, self.model_name)
	}
}

/// One persisted instance as handed out by a model store
///
/// # Examples
///
/// ```
/// use routeset_core::model::Record;
/// use serde_json::json;
///
/// let record = Record::new("7").with_field("name", json!("Lamp"));
/// assert_eq!(record.pk(), "7");
/// assert_eq!(record.get("name"), Some(&json!("Lamp")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
	pk: String,
	fields: Map<String, Value>,
}

impl Record {
	pub fn new(pk: impl Into<String>) -> Self {
		Self {
			pk: pk.into(),
			fields: Map::new(),
		}
	}

	pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
		self.fields.insert(name.into(), value);
		self
	}

	pub fn pk(&self) -> &str {
		&self.pk
	}

	pub fn get(&self, field: &str) -> Option<&Value> {
		self.fields.get(field)
	}

	pub fn fields(&self) -> &Map<String, Value> {
		&self.fields
	}

	/// Field values restricted to `names`, in that order; unknown names are skipped
	pub fn select(&self, names: &[String]) -> Map<String, Value> {
		names
			.iter()
			.filter_map(|name| self.fields.get(name).map(|v| (name.clone(), v.clone())))
			.collect()
	}
}
