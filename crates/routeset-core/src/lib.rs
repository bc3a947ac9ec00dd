//! # routeset-core
//!
//! Types every other routeset crate builds on:
//!
//! - [`exception`]: the error taxonomy (`Configuration`, `RouteNotFound`, ...)
//! - [`model`]: model metadata and records
//! - [`action`]: the actions a route can represent
//! - [`http`]: request, response and the `Handler` trait
//! - [`messages`]: one-time notifications
//! - [`auth`]: actors and the permission backend interface
//! - [`store`]: the persistence interface

pub mod action;
pub mod auth;
pub mod exception;
pub mod http;
pub mod messages;
pub mod model;
pub mod store;

pub use action::Action;
pub use auth::{Actor, AnonymousUser, ModelBackend, PermissionBackend, SimpleUser};
pub use exception::{Error, Result};
pub use http::{FunctionHandler, Handler, Request, Response};
pub use messages::{Level, Message, MessagesContainer};
pub use model::{ModelDescriptor, Record};
pub use store::{InMemoryStore, ModelStore};
