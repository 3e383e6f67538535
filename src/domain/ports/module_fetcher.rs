//! ModuleFetcher port - one unit of deployment work
//!
//! A fetcher puts a single module at `target_dir/<name>`, either by
//! cloning its remote or by linking a locally staged copy. Errors are
//! per-module values; the orchestrator records them and moves on.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::domain::entities::ModuleSpec;
use crate::domain::value_objects::NamingDelimiter;

/// Why one module could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// The VCS client could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The clone exited unsuccessfully
    #[error("clone exited with {status}")]
    Exited { status: String, stderr: String },

    /// The clone was killed after running too long
    #[error("clone timed out after {}s", .timeout.as_secs())]
    TimedOut { timeout: Duration },

    /// The local copy could not be linked
    #[error("cannot link {} -> {}: {message}", .link.display(), .source_path.display())]
    Link {
        source_path: PathBuf,
        link: PathBuf,
        message: String,
    },

    /// Any other I/O problem while supervising the clone
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Captured client output, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            FetchError::Exited { stderr, .. } if !stderr.trim().is_empty() => Some(stderr.trim()),
            _ => None,
        }
    }
}

/// Obtains module content at its target path
pub trait ModuleFetcher: Send + Sync {
    /// Shallow-clone `spec` at its ref into `target_dir/<name>`
    fn fetch_remote(&self, spec: &ModuleSpec, target_dir: &Path) -> Result<(), FetchError>;

    /// Link the staged copy of `spec` under `opt_root` into `target_dir/<name>`
    ///
    /// Returns the link source.
    fn fetch_local(
        &self,
        spec: &ModuleSpec,
        opt_root: &Path,
        target_dir: &Path,
        delimiter: NamingDelimiter,
    ) -> Result<PathBuf, FetchError>;
}
