//! Deploy Module
//!
//! Deploys one environment's module set into its `dist` directory.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`, `DeploymentRequest`)
//! - `result` - Result types (`DeploymentReport`, `ModuleOutcome`)
//! - `use_case` - The orchestrator (`DeploymentOrchestrator`)
//!
//! ## Usage
//!
//! ```ignore
//! use postrun::application::deploy::{DeployOptions, DeploymentOrchestrator, DeploymentRequest};
//!
//! let orchestrator = DeploymentOrchestrator::new(fs, fetcher, DeployOptions::default())?;
//! let report = orchestrator.deploy(&DeploymentRequest::new("production", dist, mode, modules), &sink);
//! ```

mod options;
mod result;
mod use_case;

pub use options::{DeployOptions, DeploymentRequest, DEFAULT_WORKERS};
pub use result::{DeploymentReport, HieraOutcome, ModuleOutcome, ModuleState};
pub use use_case::DeploymentOrchestrator;
