//! Path patterns, route entries, reversal and registry hooks.

pub use routeset_urls::*;
