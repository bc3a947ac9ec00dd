use std::borrow::Cow;
use std::fmt;

/// Operation a route represents
///
/// The five standard actions are fixed; `Custom` covers anything a viewset
/// adds on top. Collection-scoped actions (`Index`, `Create`) need no instance
/// key, the others do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
	Index,
	Create,
	Edit,
	Delete,
	Inspect,
	Custom { name: Cow<'static, str>, detail: bool },
}

impl Action {
	/// The standard actions in declaration order
	pub const STANDARD: [Action; 5] = [
		Action::Index,
		Action::Create,
		Action::Edit,
		Action::Delete,
		Action::Inspect,
	];

	/// Declares an extra action
	///
	/// # Examples
	///
	/// ```
	/// use routeset_core::action::Action;
	///
	/// let publish = Action::custom("publish", true);
	/// assert_eq!(publish.name(), "publish");
	/// assert!(publish.is_instance_scoped());
	/// ```
	pub fn custom(name: impl Into<Cow<'static, str>>, detail: bool) -> Self {
		Action::Custom {
			name: name.into(),
			detail,
		}
	}

	/// Maps an action name to its variant; unknown names become
	/// collection-scoped custom actions
	///
	/// # Examples
	///
	/// ```
	/// use routeset_core::action::Action;
	///
	/// assert_eq!(Action::from_name("edit"), Action::Edit);
	/// assert_eq!(Action::from_name("export"), Action::custom("export", false));
	/// ```
	pub fn from_name(name: &str) -> Self {
		match name {
			"index" => Action::Index,
			"create" => Action::Create,
			"edit" => Action::Edit,
			"delete" => Action::Delete,
			"inspect" => Action::Inspect,
			other => Action::custom(other.to_string(), false),
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Action::Index => "index",
			Action::Create => "create",
			Action::Edit => "edit",
			Action::Delete => "delete",
			Action::Inspect => "inspect",
			Action::Custom { name, .. } => name.as_ref(),
		}
	}

	/// Whether the route for this action carries an instance key
	pub fn is_instance_scoped(&self) -> bool {
		match self {
			Action::Index | Action::Create => false,
			Action::Edit | Action::Delete | Action::Inspect => true,
			Action::Custom { detail, .. } => *detail,
		}
	}

	pub fn is_standard(&self) -> bool {
		!matches!(self, Action::Custom { .. })
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
