//! Domain Entities
//!
//! Core domain objects with identity.

mod module_spec;

pub use module_spec::{ModuleSet, ModuleSpec};
