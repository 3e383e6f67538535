//! Run Module
//!
//! One postrun invocation: enumerate environments, resolve each catalog
//! and hand the module set to the deployment orchestrator.
//!
//! ## Structure
//!
//! - `options` - What to run (`RunOptions`)
//! - `result` - Aggregated outcome (`RunSummary`, `EnvironmentFailure`)
//! - `use_case` - The environment loop (`RunUseCase`)

mod options;
mod result;
mod use_case;

pub use options::RunOptions;
pub use result::{EnvironmentFailure, RunSummary};
pub use use_case::RunUseCase;
