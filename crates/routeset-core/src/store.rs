//! Persistence interface consumed by the views.
//!
//! routeset reads records through [`ModelStore`] and only ever writes through
//! [`ModelStore::delete`].

use crate::exception::{Error, Result};
use crate::model::{ModelDescriptor, Record};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

#[async_trait]
pub trait ModelStore: Send + Sync {
	/// All records of `model`, sorted by `ordering`
	///
	/// Each ordering entry names a field, prefixed with `-` for descending.
	async fn list(&self, model: &ModelDescriptor, ordering: &[String]) -> Result<Vec<Record>>;

	async fn get(&self, model: &ModelDescriptor, pk: &str) -> Result<Option<Record>>;

	/// Deletes one record; deleting an absent record is an error
	async fn delete(&self, model: &ModelDescriptor, pk: &str) -> Result<()>;
}

/// Store keeping records in memory, keyed by model slug
///
/// # Examples
///
/// ```
/// use routeset_core::model::{ModelDescriptor, Record};
/// use routeset_core::store::{InMemoryStore, ModelStore};
///
/// let product = ModelDescriptor::new("shop", "product");
/// let store = InMemoryStore::new();
/// store.insert(&product, Record::new("1"));
///
/// # futures::executor::block_on(async {
/// assert!(store.get(&product, "1").await.unwrap().is_some());
/// store.delete(&product, "1").await.unwrap();
/// assert!(store.get(&product, "1").await.unwrap().is_none());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
	tables: RwLock<HashMap<String, Vec<Record>>>,
}

impl InMemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces the record with the same pk
	pub fn insert(&self, model: &ModelDescriptor, record: Record) {
		let mut tables = self.tables.write();
		let table = tables.entry(model.slug()).or_default();
		match table.iter_mut().find(|r| r.pk() == record.pk()) {
			Some(existing) => *existing = record,
			None => table.push(record),
		}
	}

	pub fn len(&self, model: &ModelDescriptor) -> usize {
		self.tables
			.read()
			.get(&model.slug())
			.map_or(0, Vec::len)
	}

	pub fn is_empty(&self, model: &ModelDescriptor) -> bool {
		self.len(model) == 0
	}
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	match (a, b) {
		(Some(Value::Number(x)), Some(Value::Number(y))) => x
			.as_f64()
			.partial_cmp(&y.as_f64())
			.unwrap_or(Ordering::Equal),
		(Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
		(Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		_ => Ordering::Equal,
	}
}

fn compare_records(a: &Record, b: &Record, ordering: &[String], pk_field: &str) -> Ordering {
	for key in ordering {
		let (field, descending) = match key.strip_prefix('-') {
			Some(field) => (field, true),
			None => (key.as_str(), false),
		};
		let ord = if field == "pk" || field == pk_field {
			a.pk().cmp(b.pk())
		} else {
			compare_values(a.get(field), b.get(field))
		};
		let ord = if descending { ord.reverse() } else { ord };
		if ord != Ordering::Equal {
			return ord;
		}
	}
	Ordering::Equal
}

#[async_trait]
impl ModelStore for InMemoryStore {
	async fn list(&self, model: &ModelDescriptor, ordering: &[String]) -> Result<Vec<Record>> {
		let mut records = self
			.tables
			.read()
			.get(&model.slug())
			.cloned()
			.unwrap_or_default();
		if !ordering.is_empty() {
			records.sort_by(|a, b| compare_records(a, b, ordering, model.pk_field()));
		}
		Ok(records)
	}

	async fn get(&self, model: &ModelDescriptor, pk: &str) -> Result<Option<Record>> {
		Ok(self
			.tables
			.read()
			.get(&model.slug())
			.and_then(|table| table.iter().find(|r| r.pk() == pk).cloned()))
	}

	async fn delete(&self, model: &ModelDescriptor, pk: &str) -> Result<()> {
		let mut tables = self.tables.write();
		let table = tables
			.get_mut(&model.slug())
			.ok_or_else(|| Error::Store(format!("no table for {}", model.slug())))?;
		let before = table.len();
		table.retain(|r| r.pk() != pk);
		if table.len() == before {
			return Err(Error::Store(format!("{} {} does not exist", model.slug(), pk)));
		}
		Ok(())
	}
}
