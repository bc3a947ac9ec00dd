use crate::sources::{merge_sources, ConfigSource, DefaultSource, EnvSource, TomlFileSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid settings: {0}")]
	Invalid(String),
}

impl From<SettingsError> for routeset_core::Error {
	fn from(err: SettingsError) -> Self {
		routeset_core::Error::Configuration(err.to_string())
	}
}

/// Site-wide settings read by a registry
///
/// # Examples
///
/// ```
/// use routeset_conf::RoutesSettings;
///
/// let settings = RoutesSettings::from_toml_str(r#"
/// site_header = "Shop"
/// mount_path = "/admin/"
/// "#).unwrap();
/// assert_eq!(settings.site_header, "Shop");
/// assert_eq!(settings.mount_path, "/admin/");
/// assert!(settings.index_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesSettings {
	/// Text for the HTML `<title>`
	pub site_title: String,
	/// Text at the top of every page
	pub site_header: String,
	/// Title of the index page
	pub index_title: String,
	/// Whether the registry prepends its index route
	pub index_enabled: bool,
	pub index_template: String,
	/// URL prefix the registry is served under; starts and ends with `/`
	pub mount_path: String,
}

impl Default for RoutesSettings {
	fn default() -> Self {
		Self {
			site_title: "Site admin".to_string(),
			site_header: "Administration".to_string(),
			index_title: "Site administration".to_string(),
			index_enabled: true,
			index_template: "index.html".to_string(),
			mount_path: "/".to_string(),
		}
	}
}

impl RoutesSettings {
	/// Parses and validates a TOML document; absent keys keep their defaults
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Like [`from_toml_str`](Self::from_toml_str), failing when the file is unreadable
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let content = fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Defaults, then `path` if it exists, then `ROUTESET_*` variables
	pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
		let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(Self::default_source()?)];
		if let Some(path) = path {
			sources.push(Box::new(TomlFileSource::new(path)));
		}
		sources.push(Box::new(EnvSource::routeset()));
		Self::from_sources(&sources)
	}

	/// Merges `sources` by priority and validates the result
	pub fn from_sources(sources: &[Box<dyn ConfigSource>]) -> Result<Self, SettingsError> {
		let merged = merge_sources(sources)?;
		let object: serde_json::Map<String, Value> = merged.into_iter().collect();
		let settings: Self = serde_json::from_value(Value::Object(object))
			.map_err(|e| SettingsError::Invalid(e.to_string()))?;
		settings.validate()?;
		Ok(settings)
	}

	fn default_source() -> Result<DefaultSource, SettingsError> {
		let value = serde_json::to_value(Self::default())
			.map_err(|e| SettingsError::Invalid(e.to_string()))?;
		let Value::Object(map) = value else {
			return Err(SettingsError::Invalid("defaults are not a table".to_string()));
		};
		Ok(map
			.into_iter()
			.fold(DefaultSource::new(), |source, (k, v)| source.with_value(k, v)))
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		if !self.mount_path.starts_with('/') || !self.mount_path.ends_with('/') {
			return Err(SettingsError::Invalid(format!(
				"mount_path must start and end with '/', got {:?}",
				self.mount_path
			)));
		}
		if self.index_enabled && self.index_template.trim().is_empty() {
			return Err(SettingsError::Invalid(
				"index_template must not be empty while the index is enabled".to_string(),
			));
		}
		Ok(())
	}
}
