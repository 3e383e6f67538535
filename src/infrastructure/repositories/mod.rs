//! Repository Implementations
//!
//! Concrete implementations of repository ports.

mod catalog;

pub use catalog::{YamlCatalogRepository, CATALOG_FILE};
