//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod catalog_repository;
pub mod deploy_events;
pub mod file_system;
pub mod location_resolver;
pub mod module_fetcher;

pub use catalog_repository::CatalogRepository;
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use file_system::{FileSystem, FsError, FsResult};
pub use location_resolver::{FixedLocation, LocationResolver};
pub use module_fetcher::{FetchError, ModuleFetcher};
