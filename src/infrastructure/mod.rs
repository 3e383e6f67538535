//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `repositories/` - YAML catalog repository
//! - `git/` - git CLI fetcher and subprocess supervision
//! - `location/` - facter location lookup
//! - `events/` - log event sink

pub mod events;
pub mod fs;
pub mod git;
pub mod location;
pub mod repositories;

// Re-export for convenience
pub use events::LogEventSink;
pub use fs::LocalFs;
pub use git::{GitModuleFetcher, DEFAULT_CLONE_TIMEOUT};
pub use location::{FacterLocation, DEFAULT_FACTER};
pub use repositories::{YamlCatalogRepository, CATALOG_FILE};
