//! # routeset-conf
//!
//! Settings for a routeset registry.
//!
//! [`RoutesSettings`] is assembled from layered sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. a TOML file
//! 3. `ROUTESET_*` environment variables
//!
//! ```no_run
//! use routeset_conf::RoutesSettings;
//! use std::path::Path;
//!
//! let settings = RoutesSettings::load(Some(Path::new("routeset.toml")))?;
//! println!("serving under {}", settings.mount_path);
//! # Ok::<(), routeset_conf::SettingsError>(())
//! ```

pub mod settings;
pub mod sources;

pub use settings::{RoutesSettings, SettingsError};
pub use sources::{ConfigSource, DefaultSource, EnvSource, TomlFileSource};
