//! postrun - Puppet module deployment after code updates
//!
//! For every environment under the environments root, postrun reads
//! `modules.yaml`, picks the module set of this machine's location and
//! materializes each module under `<environment>/dist`: a shallow git
//! clone, or on Vagrant boxes a symlink to a locally staged checkout.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{
    DeployOptions, DeploymentOrchestrator, DeploymentReport, DeploymentRequest, RunOptions,
    RunSummary, RunUseCase,
};
pub use config::Config;
pub use error::{PostrunError, PostrunResult};
