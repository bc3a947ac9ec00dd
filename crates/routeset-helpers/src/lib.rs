//! # routeset-helpers
//!
//! Helpers a viewset binds to its model:
//!
//! - [`UrlHelper`]: route patterns, route names and reversed URLs
//! - [`PermissionHelper`]: yes/no capability checks through a permission backend
//! - [`ButtonHelper`]: permitted action buttons for a record
//! - [`UrlFinder`]: the edit URL of a record, when permitted

pub mod button;
pub mod permission;
pub mod url;

pub use button::{ButtonClassnames, ButtonDescriptor, ButtonHelper, ButtonOptions};
pub use permission::PermissionHelper;
pub use url::{quote, unquote, UrlFinder, UrlHelper};
