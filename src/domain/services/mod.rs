//! Domain Services
//!
//! Business logic that operates on domain entities through ports.

mod catalog;
mod presence;

pub use catalog::{parse_spec, select_location, LocationSelection, ModuleCatalog, ModuleRequest};
pub use presence::{LocalPresenceChecker, PresenceResult};
