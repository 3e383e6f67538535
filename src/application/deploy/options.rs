//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::path::PathBuf;

use crate::domain::entities::ModuleSet;
use crate::domain::value_objects::DeployMode;

/// Default number of concurrent fetches
pub const DEFAULT_WORKERS: usize = 10;

/// Fixed paths and limits of the orchestrator
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Root of locally staged modules (Local mode)
    pub local_modules: PathBuf,
    /// Root holding one hiera data entry per environment
    pub hiera_root: PathBuf,
    /// Shared hiera data the per-environment entry points at (Local mode)
    pub hiera_source: PathBuf,
    /// Worker pool size
    pub workers: usize,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            local_modules: PathBuf::from("/opt/puppet/modules"),
            hiera_root: PathBuf::from("/etc/puppetlabs/code/hieradata"),
            hiera_source: PathBuf::from("/opt/puppet/hiera"),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl DeployOptions {
    pub fn with_local_modules(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_modules = path.into();
        self
    }

    pub fn with_hiera_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.hiera_root = path.into();
        self
    }

    pub fn with_hiera_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.hiera_source = path.into();
        self
    }

    /// Pool size, clamped to at least one worker
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// One environment to deploy
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub environment: String,
    /// Directory receiving one entry per module (`<env>/dist`)
    pub target_dir: PathBuf,
    pub mode: DeployMode,
    pub modules: ModuleSet,
}

impl DeploymentRequest {
    pub fn new(
        environment: impl Into<String>,
        target_dir: impl Into<PathBuf>,
        mode: DeployMode,
        modules: ModuleSet,
    ) -> Self {
        Self {
            environment: environment.into(),
            target_dir: target_dir.into(),
            mode,
            modules,
        }
    }
}
