//! Model-wide permission checks.
//!
//! Keys have the form `"{app_label}.{verb}_{model_name}"` with the verbs
//! `add`, `change`, `delete` and `view`. Listing and inspecting need any one of
//! them; create, edit and delete need their own verb. Anything else is denied.

use routeset_core::action::Action;
use routeset_core::auth::{Actor, PermissionBackend};
use routeset_core::model::{ModelDescriptor, Record};
use std::fmt;
use std::sync::Arc;

/// Every verb a model carries a permission for
pub const MODEL_VERBS: [&str; 4] = ["add", "change", "delete", "view"];

/// Answers whether an actor may perform an action on a model
///
/// # Examples
///
/// ```
/// use routeset_core::auth::{ModelBackend, SimpleUser};
/// use routeset_core::{Action, ModelDescriptor, Record};
/// use routeset_helpers::PermissionHelper;
/// use std::sync::Arc;
///
/// let helper = PermissionHelper::new(ModelDescriptor::new("shop", "product"), Arc::new(ModelBackend));
/// let clerk = SimpleUser::new("clerk").with_permission("shop.change_product");
/// let record = Record::new("1");
///
/// assert!(helper.can(&clerk, &Action::Edit, Some(&record)));
/// assert!(helper.can(&clerk, &Action::Index, None));
/// assert!(!helper.can(&clerk, &Action::Delete, Some(&record)));
/// ```
#[derive(Clone)]
pub struct PermissionHelper {
	model: ModelDescriptor,
	backend: Arc<dyn PermissionBackend>,
	inspect_public: bool,
}

impl PermissionHelper {
	pub fn new(model: ModelDescriptor, backend: Arc<dyn PermissionBackend>) -> Self {
		Self {
			model,
			backend,
			inspect_public: false,
		}
	}

	/// Lets everyone inspect records, including anonymous actors
	pub fn with_inspect_public(mut self, public: bool) -> Self {
		self.inspect_public = public;
		self
	}

	pub fn model(&self) -> &ModelDescriptor {
		&self.model
	}

	pub fn inspect_public(&self) -> bool {
		self.inspect_public
	}

	/// `"{app_label}.{verb}_{model_name}"`
	pub fn key_for(&self, verb: &str) -> String {
		format!(
			"{}.{}_{}",
			self.model.app_label(),
			verb,
			self.model.model_name()
		)
	}

	/// The single permission an action requires
	///
	/// `None` for index and inspect, which accept any model permission, and
	/// for custom actions, which are never granted.
	pub fn permission_key(&self, action: &Action) -> Option<String> {
		let verb = match action {
			Action::Create => "add",
			Action::Edit => "change",
			Action::Delete => "delete",
			Action::Index | Action::Inspect | Action::Custom { .. } => return None,
		};
		Some(self.key_for(verb))
	}

	fn has_key(&self, actor: &dyn Actor, key: &str) -> bool {
		self.backend.has_permission(actor, key)
	}

	/// Whether the actor holds at least one permission on the model
	pub fn has_any_permissions(&self, actor: &dyn Actor) -> bool {
		MODEL_VERBS
			.iter()
			.any(|verb| self.has_key(actor, &self.key_for(verb)))
	}

	/// `target` is accepted for instance-scoped actions; checks stay model-wide
	pub fn can(&self, actor: &dyn Actor, action: &Action, _target: Option<&Record>) -> bool {
		let allowed = match action {
			Action::Index => self.has_any_permissions(actor),
			Action::Inspect => self.inspect_public || self.has_any_permissions(actor),
			Action::Create | Action::Edit | Action::Delete => self
				.permission_key(action)
				.is_some_and(|key| self.has_key(actor, &key)),
			Action::Custom { .. } => false,
		};
		tracing::trace!(
			model = %self.model.slug(),
			action = %action,
			user = actor.username(),
			allowed,
			"permission check"
		);
		allowed
	}

	pub fn can_list(&self, actor: &dyn Actor) -> bool {
		self.can(actor, &Action::Index, None)
	}

	pub fn can_create(&self, actor: &dyn Actor) -> bool {
		self.can(actor, &Action::Create, None)
	}

	pub fn can_inspect(&self, actor: &dyn Actor, record: &Record) -> bool {
		self.can(actor, &Action::Inspect, Some(record))
	}

	pub fn can_edit(&self, actor: &dyn Actor, record: &Record) -> bool {
		self.can(actor, &Action::Edit, Some(record))
	}

	pub fn can_delete(&self, actor: &dyn Actor, record: &Record) -> bool {
		self.can(actor, &Action::Delete, Some(record))
	}

	/// Ownership extension point: the actor owns the record or is a superuser
	pub fn is_owner_or_admin(&self, actor: &dyn Actor, owner: Option<&str>) -> bool {
		if actor.is_superuser() && actor.is_active() {
			return true;
		}
		actor.is_authenticated() && owner.is_some_and(|owner| owner == actor.username())
	}
}

impl fmt::Debug for PermissionHelper {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PermissionHelper")
			.field("model", &self.model.slug())
			.field("inspect_public", &self.inspect_public)
			.finish_non_exhaustive()
	}
}
