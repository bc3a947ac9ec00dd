//! Minimal request/response pair and the handler interface routes bind to.

use crate::auth::{Actor, AnonymousUser};
use crate::exception::{Error, Result};
use crate::messages::MessagesContainer;
use async_trait::async_trait;
use bytes::Bytes;
use futures::future::BoxFuture;
use http::header::{CONTENT_TYPE, LOCATION};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Incoming request as seen by route handlers
#[derive(Clone)]
pub struct Request {
	pub method: Method,
	pub path: String,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// Values captured by the matched route pattern
	pub path_params: HashMap<String, String>,
	pub messages: MessagesContainer,
	user: Option<Arc<dyn Actor>>,
}

impl Request {
	/// Creates a request with no user, headers or body
	///
	/// # Examples
	///
	/// ```
	/// use routeset_core::http::Request;
	/// use http::Method;
	///
	/// let request = Request::new(Method::GET, "/product/");
	/// assert_eq!(request.path, "/product/");
	/// assert!(!request.actor().is_authenticated());
	/// ```
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			headers: HeaderMap::new(),
			body: Bytes::new(),
			path_params: HashMap::new(),
			messages: MessagesContainer::new(),
			user: None,
		}
	}

	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	pub fn with_user(mut self, user: Arc<dyn Actor>) -> Self {
		self.user = Some(user);
		self
	}

	pub fn with_messages(mut self, messages: MessagesContainer) -> Self {
		self.messages = messages;
		self
	}

	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// The requesting actor, [`AnonymousUser`] when none is attached
	pub fn actor(&self) -> &dyn Actor {
		match &self.user {
			Some(user) => user.as_ref(),
			None => &AnonymousUser,
		}
	}

	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(String::as_str)
	}
}

impl fmt::Debug for Request {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Request")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("path_params", &self.path_params)
			.field("user", &self.user.as_ref().map(|u| u.username().to_string()))
			.finish()
	}
}

/// HTTP response produced by handlers
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	pub fn forbidden() -> Self {
		Self::new(StatusCode::FORBIDDEN)
	}

	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	pub fn method_not_allowed() -> Self {
		Self::new(StatusCode::METHOD_NOT_ALLOWED)
	}

	/// HTTP 302 Found pointing at `location`
	///
	/// # Examples
	///
	/// ```
	/// use routeset_core::http::Response;
	/// use http::StatusCode;
	///
	/// let response = Response::redirect("/product/");
	/// assert_eq!(response.status, StatusCode::FOUND);
	/// assert_eq!(response.location(), Some("/product/"));
	/// ```
	pub fn redirect(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::FOUND).with_location(location.as_ref())
	}

	pub fn with_location(mut self, location: &str) -> Self {
		if let Ok(value) = HeaderValue::from_str(location) {
			self.headers.insert(LOCATION, value);
		}
		self
	}

	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self> {
		let body = serde_json::to_vec(value)?;
		Ok(self.with_content_type("application/json").with_body(body))
	}

	pub fn with_content_type(mut self, content_type: &'static str) -> Self {
		self.headers
			.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
		self
	}

	pub fn location(&self) -> Option<&str> {
		self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
	}

	pub fn body_text(&self) -> Result<&str> {
		std::str::from_utf8(&self.body).map_err(|e| Error::Internal(e.to_string()))
	}
}

/// Something a route can invoke
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

type BoxedHandlerFn = dyn Fn(Request) -> BoxFuture<'static, Result<Response>> + Send + Sync;

/// Wraps a plain async function as a [`Handler`]
///
/// # Examples
///
/// ```
/// use routeset_core::http::{FunctionHandler, Handler, Request, Response};
///
/// let handler = FunctionHandler::new(|_req: Request| async { Ok(Response::ok()) });
/// # futures::executor::block_on(async move {
/// let response = handler.handle(Request::get("/")).await.unwrap();
/// assert_eq!(response.status, http::StatusCode::OK);
/// # });
/// ```
#[derive(Clone)]
pub struct FunctionHandler {
	func: Arc<BoxedHandlerFn>,
}

impl FunctionHandler {
	pub fn new<F, Fut>(func: F) -> Self
	where
		F: Fn(Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		Self {
			func: Arc::new(move |request| -> BoxFuture<'static, Result<Response>> {
				Box::pin(func(request))
			}),
		}
	}
}

impl fmt::Debug for FunctionHandler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("FunctionHandler")
	}
}

#[async_trait]
impl Handler for FunctionHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		(self.func)(request).await
	}
}
