//! Path patterns with `{name}` placeholders.
//!
//! Every placeholder captures one URL segment made of ASCII letters, digits,
//! `-` and `_`. Literal text must match exactly and the whole path must match.

use regex::Regex;
use routeset_core::exception::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Character class a captured segment is drawn from
pub const TOKEN_CLASS: &str = "[-A-Za-z0-9_]+";

/// Maximum accepted pattern length in bytes
const MAX_PATTERN_LENGTH: usize = 1024;

/// Whether `value` may fill a placeholder
///
/// # Examples
///
/// ```
/// use routeset_urls::pattern::is_valid_token;
///
/// assert!(is_valid_token("item-42_a"));
/// assert!(!is_valid_token("a/b"));
/// assert!(!is_valid_token(""));
/// ```
pub fn is_valid_token(value: &str) -> bool {
	!value.is_empty()
		&& value
			.bytes()
			.all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Placeholder names in order of appearance
///
/// # Examples
///
/// ```
/// use routeset_urls::pattern::extract_param_names;
///
/// assert_eq!(extract_param_names("inspect/{pk}/"), vec!["pk"]);
/// assert!(extract_param_names("create/").is_empty());
/// ```
pub fn extract_param_names(pattern: &str) -> Vec<String> {
	let mut names = Vec::new();
	let mut chars = pattern.chars();
	while let Some(ch) = chars.next() {
		if ch == '{' {
			let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
			if !name.is_empty() {
				names.push(name);
			}
		}
	}
	names
}

/// A compiled path pattern
#[derive(Clone)]
pub struct PathPattern {
	pattern: String,
	regex: Regex,
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles `pattern`
	///
	/// # Errors
	///
	/// `Error::Configuration` for an unterminated or empty placeholder, a
	/// placeholder name that is not an identifier, or an oversized pattern.
	///
	/// # Examples
	///
	/// ```
	/// use routeset_urls::pattern::PathPattern;
	///
	/// let pattern = PathPattern::new("/product/inspect/{pk}/").unwrap();
	/// let params = pattern.captures("/product/inspect/42/").unwrap();
	/// assert_eq!(params["pk"], "42");
	/// assert!(pattern.captures("/product/inspect/4/2/").is_none());
	/// ```
	pub fn new(pattern: impl Into<String>) -> Result<Self> {
		let pattern = pattern.into();
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(Error::Configuration(format!(
				"pattern exceeds {} bytes",
				MAX_PATTERN_LENGTH
			)));
		}

		let (regex_str, param_names) = Self::compile(&pattern)?;
		let regex = Regex::new(&regex_str)
			.map_err(|e| Error::Configuration(format!("pattern {:?}: {}", pattern, e)))?;

		Ok(Self {
			pattern,
			regex,
			param_names,
		})
	}

	fn compile(pattern: &str) -> Result<(String, Vec<String>)> {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut literal = String::new();
		let mut chars = pattern.chars();

		while let Some(c) = chars.next() {
			if c != '{' {
				literal.push(c);
				continue;
			}
			regex_str.push_str(&regex::escape(&literal));
			literal.clear();

			let mut name = String::new();
			let mut closed = false;
			for next in chars.by_ref() {
				if next == '}' {
					closed = true;
					break;
				}
				name.push(next);
			}
			let valid_name = !name.is_empty()
				&& !name.starts_with(|c: char| c.is_ascii_digit())
				&& name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
			if !closed || !valid_name {
				return Err(Error::Configuration(format!(
					"invalid placeholder in pattern {:?}",
					pattern
				)));
			}
			regex_str.push_str(&format!("(?P<{}>{})", name, TOKEN_CLASS));
			param_names.push(name);
		}
		regex_str.push_str(&regex::escape(&literal));
		regex_str.push('$');

		Ok((regex_str, param_names))
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Captured placeholder values when `path` matches
	pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
		let caps = self.regex.captures(path)?;
		Some(
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect(),
		)
	}

	/// Fills the placeholders from `params`, which must name each exactly once
	pub fn substitute(&self, params: &HashMap<String, String>) -> Result<String> {
		for name in &self.param_names {
			let value = params.get(name).ok_or_else(|| {
				Error::RouteNotFound(format!("{:?} is missing parameter {:?}", self.pattern, name))
			})?;
			if !is_valid_token(value) {
				return Err(Error::RouteNotFound(format!(
					"{:?} is not a valid value for {:?}",
					value, name
				)));
			}
		}
		if let Some(extra) = params.keys().find(|k| !self.param_names.contains(k)) {
			return Err(Error::RouteNotFound(format!(
				"{:?} takes no parameter {:?}",
				self.pattern, extra
			)));
		}

		let mut result = String::with_capacity(self.pattern.len());
		let mut chars = self.pattern.chars();
		while let Some(ch) = chars.next() {
			if ch == '{' {
				let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
				if let Some(value) = params.get(&name) {
					result.push_str(value);
				}
			} else {
				result.push(ch);
			}
		}
		Ok(result)
	}
}

impl fmt::Debug for PathPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PathPattern")
			.field("pattern", &self.pattern)
			.field("param_names", &self.param_names)
			.finish()
	}
}
