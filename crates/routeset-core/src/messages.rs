//! One-time notifications attached to a request.
//!
//! Views push messages into the request's [`MessagesContainer`]; whatever
//! renders the next page drains them.

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Debug,
	Info,
	Success,
	Warning,
	Error,
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let tag = match self {
			Level::Debug => "debug",
			Level::Info => "info",
			Level::Success => "success",
			Level::Warning => "warning",
			Level::Error => "error",
		};
		f.write_str(tag)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
	pub level: Level,
	pub text: String,
}

impl Message {
	pub fn new(level: Level, text: impl Into<String>) -> Self {
		Self {
			level,
			text: text.into(),
		}
	}

	pub fn info(text: impl Into<String>) -> Self {
		Self::new(Level::Info, text)
	}

	pub fn success(text: impl Into<String>) -> Self {
		Self::new(Level::Success, text)
	}

	pub fn warning(text: impl Into<String>) -> Self {
		Self::new(Level::Warning, text)
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self::new(Level::Error, text)
	}
}

/// Shared message list; clones point at the same storage
///
/// # Examples
///
/// ```
/// use routeset_core::messages::{Message, MessagesContainer};
///
/// let container = MessagesContainer::new();
/// let handle = container.clone();
/// handle.add(Message::success("Saved"));
/// assert_eq!(container.get_messages().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MessagesContainer {
	messages: Arc<Mutex<Vec<Message>>>,
}

impl MessagesContainer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&self, message: Message) {
		self.messages.lock().push(message);
	}

	pub fn get_messages(&self) -> Vec<Message> {
		self.messages.lock().clone()
	}

	/// Returns and removes every stored message
	pub fn drain(&self) -> Vec<Message> {
		std::mem::take(&mut *self.messages.lock())
	}
}

impl fmt::Debug for MessagesContainer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MessagesContainer")
			.field("len", &self.messages.lock().len())
			.finish()
	}
}
