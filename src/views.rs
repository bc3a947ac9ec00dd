//! Viewsets, capabilities and the index, inspect and delete views.

pub use routeset_views::*;
