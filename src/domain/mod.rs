//! Domain Layer
//!
//! The deployment rules of postrun, independent of git, YAML files and
//! the local disk.
//!
//! ## Structure
//!
//! - `entities/` - Module specifications (ModuleSpec, ModuleSet)
//! - `value_objects/` - Immutable value types (Location, DeployMode, NamingDelimiter)
//! - `services/` - Catalog resolution and local presence checks
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **Ports & Adapters** - All I/O goes through trait-defined ports
//! 2. **Events, not logging** - Conditions are reported through `DeployEventSink`

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
