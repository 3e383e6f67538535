//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeploymentOrchestrator` - Deploys one environment's modules on a worker pool
//! - `RunUseCase` - Walks all environments, resolving catalogs and deploying each

pub mod deploy;
pub mod run;

pub use deploy::{
    DeployOptions, DeploymentOrchestrator, DeploymentReport, DeploymentRequest, HieraOutcome,
    ModuleOutcome, ModuleState, DEFAULT_WORKERS,
};
pub use run::{EnvironmentFailure, RunOptions, RunSummary, RunUseCase};
