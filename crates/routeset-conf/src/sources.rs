//! Configuration sources merged into [`RoutesSettings`](crate::RoutesSettings)
//!
//! Sources are applied in ascending priority, so a key from a higher-priority
//! source replaces the same key from a lower one:
//! defaults < TOML file < environment variables.

use crate::settings::SettingsError;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Keys whose environment values are parsed as booleans
const BOOL_KEYS: &[&str] = &["index_enabled"];

/// Environment prefix read by [`EnvSource::routeset`]
pub const ENV_PREFIX: &str = "ROUTESET_";

pub trait ConfigSource: Send + Sync {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError>;

	/// Higher wins
	fn priority(&self) -> u8;

	fn description(&self) -> String;
}

/// Fixed values, lowest priority
#[derive(Debug, Default, Clone)]
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// # Examples
	///
	/// ```
	/// use routeset_conf::sources::{ConfigSource, DefaultSource};
	/// use serde_json::Value;
	///
	/// let source = DefaultSource::new().with_value("index_enabled", Value::Bool(false));
	/// assert_eq!(source.load().unwrap()["index_enabled"], Value::Bool(false));
	/// ```
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// Top-level keys of a TOML file; a missing file contributes nothing
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

pub(crate) fn toml_to_map(content: &str) -> Result<IndexMap<String, Value>, SettingsError> {
	let toml_value: toml::Value = toml::from_str(content)?;
	let json_value = serde_json::to_value(toml_value)
		.map_err(|e| SettingsError::Invalid(e.to_string()))?;
	match json_value {
		Value::Object(map) => Ok(map.into_iter().collect()),
		_ => Err(SettingsError::Invalid("expected a table at the root".to_string())),
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}
		let content = fs::read_to_string(&self.path)?;
		toml_to_map(&content)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variables carrying a prefix, highest priority
///
/// Keys are stripped of the prefix and lowercased, so `ROUTESET_SITE_TITLE`
/// sets `site_title`.
#[derive(Debug, Clone)]
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			vars: None,
		}
	}

	/// Reads `ROUTESET_*` variables
	pub fn routeset() -> Self {
		Self::new(ENV_PREFIX)
	}

	/// Reads from the given pairs instead of the process environment
	///
	/// # Examples
	///
	/// ```
	/// use routeset_conf::sources::{ConfigSource, EnvSource};
	/// use serde_json::Value;
	///
	/// let source = EnvSource::routeset().with_vars([
	/// 	("ROUTESET_INDEX_ENABLED", "off"),
	/// 	("ROUTESET_SITE_TITLE", "Shop"),
	/// 	("HOME", "/root"),
	/// ]);
	/// let values = source.load().unwrap();
	/// assert_eq!(values["index_enabled"], Value::Bool(false));
	/// assert_eq!(values["site_title"], Value::String("Shop".into()));
	/// assert!(!values.contains_key("home"));
	/// ```
	pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(
			vars.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		);
		self
	}

	fn parse_value(&self, key: &str, value: String) -> Result<Value, SettingsError> {
		if !BOOL_KEYS.contains(&key) {
			return Ok(Value::String(value));
		}
		match value.trim().to_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
			"false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
			other => Err(SettingsError::Invalid(format!(
				"{}{} expects a boolean, got {:?}",
				self.prefix,
				key.to_uppercase(),
				other
			))),
		}
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		let vars: Vec<(String, String)> = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};

		let mut config = IndexMap::new();
		for (key, value) in vars {
			let Some(stripped) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let key = stripped.to_lowercase();
			let value = self.parse_value(&key, value)?;
			config.insert(key, value);
		}
		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// Merges sources by ascending priority
pub fn merge_sources(
	sources: &[Box<dyn ConfigSource>],
) -> Result<IndexMap<String, Value>, SettingsError> {
	let mut ordered: Vec<&dyn ConfigSource> = sources.iter().map(AsRef::as_ref).collect();
	ordered.sort_by_key(|source| source.priority());

	let mut merged = IndexMap::new();
	for source in ordered {
		let values = source.load()?;
		tracing::debug!(source = %source.description(), keys = values.len(), "loaded settings source");
		merged.extend(values);
	}
	Ok(merged)
}
