//! The viewset registry.

pub use routeset_routers::*;
