//! URL, permission and button helpers bound to one model.

pub use routeset_helpers::*;
