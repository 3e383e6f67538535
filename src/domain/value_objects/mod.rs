//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod delimiter;
mod deploy_mode;
mod location;

pub use config_warning::ConfigWarning;
pub use delimiter::NamingDelimiter;
pub use deploy_mode::{DeployMode, ModeSetting};
pub use location::{Location, DEFAULT_LOCATION};
