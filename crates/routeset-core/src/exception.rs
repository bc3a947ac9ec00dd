//! Error taxonomy shared by every routeset crate.
//!
//! Configuration problems surface at startup and must abort it. Reverse
//! failures surface at resolution time and are handed back to the caller.
//! Permission denial is never an error: helpers answer with `bool`.

use thiserror::Error;

/// Framework error type
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
	/// Invalid setup detected while registering viewsets or building routes
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// A route name could not be reversed with the given parameters
	#[error("No reverse match: {0}")]
	RouteNotFound(String),

	/// The requested object does not exist
	#[error("Not found: {0}")]
	NotFound(String),

	/// The model store failed
	#[error("Store error: {0}")]
	Store(String),

	/// The template renderer failed
	#[error("Template error: {0}")]
	Template(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// Returns `true` for errors that must abort startup.
	///
	/// # Examples
	///
	/// ```
	/// use routeset_core::exception::Error;
	///
	/// assert!(Error::Configuration("no model".into()).is_configuration());
	/// assert!(!Error::RouteNotFound("x".into()).is_configuration());
	/// ```
	pub fn is_configuration(&self) -> bool {
		matches!(self, Error::Configuration(_))
	}
}

pub type Result<T> = std::result::Result<T, Error>;
