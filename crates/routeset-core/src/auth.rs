//! Actors and the permission backend interface.
//!
//! Permissions are strings of the form `"app_label.codename"`, e.g.
//! `"shop.delete_product"`. Whoever stores them (a user table, a token, a
//! test fixture) implements [`Actor`]; whoever decides on them implements
//! [`PermissionBackend`].

use std::collections::HashSet;
use tracing::trace;

/// Whoever issues a request
pub trait Actor: Send + Sync {
	fn username(&self) -> &str;

	fn is_authenticated(&self) -> bool {
		true
	}

	fn is_active(&self) -> bool {
		true
	}

	/// Superusers hold every permission without explicit assignment
	fn is_superuser(&self) -> bool {
		false
	}

	/// Permissions granted directly to this actor
	fn user_permissions(&self) -> &[String];

	/// Permissions inherited from groups; empty unless overridden
	fn group_permissions(&self) -> HashSet<String> {
		HashSet::new()
	}

	fn all_permissions(&self) -> HashSet<String> {
		let mut perms: HashSet<String> = self.user_permissions().iter().cloned().collect();
		perms.extend(self.group_permissions());
		perms
	}

	/// Checks a single `"app_label.codename"` permission
	fn has_perm(&self, perm: &str) -> bool {
		if self.is_superuser() {
			return true;
		}
		self.all_permissions().contains(perm)
	}
}

/// Decides whether an actor holds a permission key
pub trait PermissionBackend: Send + Sync {
	fn has_permission(&self, actor: &dyn Actor, permission_key: &str) -> bool;
}

/// Backend answering from the actor's own permission set
///
/// Inactive and anonymous actors hold nothing; active superusers hold everything.
///
/// # Examples
///
/// ```
/// use routeset_core::auth::{ModelBackend, PermissionBackend, SimpleUser};
///
/// let user = SimpleUser::new("alice").with_permission("shop.change_product");
/// assert!(ModelBackend.has_permission(&user, "shop.change_product"));
/// assert!(!ModelBackend.has_permission(&user, "shop.delete_product"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelBackend;

impl PermissionBackend for ModelBackend {
	fn has_permission(&self, actor: &dyn Actor, permission_key: &str) -> bool {
		if !actor.is_authenticated() || !actor.is_active() {
			trace!(user = actor.username(), permission = permission_key, "actor is anonymous or inactive");
			return false;
		}
		actor.has_perm(permission_key)
	}
}

/// Plain in-memory actor
#[derive(Debug, Clone, Default)]
pub struct SimpleUser {
	username: String,
	is_superuser: bool,
	is_active: bool,
	permissions: Vec<String>,
}

impl SimpleUser {
	pub fn new(username: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			is_superuser: false,
			is_active: true,
			permissions: Vec::new(),
		}
	}

	pub fn superuser(username: impl Into<String>) -> Self {
		Self {
			is_superuser: true,
			..Self::new(username)
		}
	}

	pub fn with_permission(mut self, perm: impl Into<String>) -> Self {
		self.permissions.push(perm.into());
		self
	}

	pub fn with_permissions<I, S>(mut self, perms: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.permissions.extend(perms.into_iter().map(Into::into));
		self
	}

	pub fn inactive(mut self) -> Self {
		self.is_active = false;
		self
	}
}

impl Actor for SimpleUser {
	fn username(&self) -> &str {
		&self.username
	}

	fn is_active(&self) -> bool {
		self.is_active
	}

	fn is_superuser(&self) -> bool {
		self.is_superuser
	}

	fn user_permissions(&self) -> &[String] {
		&self.permissions
	}
}

/// Actor used when a request carries no user
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousUser;

impl Actor for AnonymousUser {
	fn username(&self) -> &str {
		""
	}

	fn is_authenticated(&self) -> bool {
		false
	}

	fn user_permissions(&self) -> &[String] {
		&[]
	}
}
