//! Errors, HTTP types, models, permissions, messages and the store interface.
//!
//! # Examples
//!
//! ```
//! use routeset::core::{Action, ModelDescriptor};
//!
//! let product = ModelDescriptor::new("shop", "Product");
//! assert_eq!(product.slug(), "shop_product");
//! assert_eq!(Action::from_name("delete"), Action::Delete);
//! ```

pub use routeset_core::*;
