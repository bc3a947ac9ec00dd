//! Routing settings layered from defaults, a TOML file and `ROUTESET_*` variables.

pub use routeset_conf::*;
