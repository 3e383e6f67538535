//! Deploy Event Port
//!
//! The reporter handle threaded through catalog resolution, the
//! orchestrator and the run loop. Nothing in the library logs directly;
//! every user-visible condition is an event handed to a sink.

use std::path::PathBuf;

/// Event emitted during a postrun run
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Run started
    RunStarted {
        location: String,
        mode: String,
        environment_count: usize,
    },

    /// Processing of an environment started
    EnvironmentStarted { environment: String },

    /// The environment has no modules.yaml
    CatalogMissing { environment: String, path: PathBuf },

    /// The location is not configured, `default` is used instead
    LocationFallback {
        environment: String,
        location: String,
    },

    /// The explicitly requested module is not in the catalog
    ModuleNotFound { environment: String, module: String },

    /// The hiera data symlink was re-pointed
    HieraLinked { link: PathBuf, source: PathBuf },

    /// The hiera data symlink could not be re-pointed
    HieraFailed { link: PathBuf, error: String },

    /// A previous module entry was removed
    ModuleRemoved { module: String, path: PathBuf },

    /// A module is about to be linked from local staging
    ModuleLinking { module: String, source: PathBuf },

    /// A module is about to be cloned
    ModuleCloning {
        module: String,
        url: String,
        git_ref: String,
    },

    /// Module reached the Linked state
    ModuleLinked { module: String, source: PathBuf },

    /// Module reached the Cloned state
    ModuleCloned { module: String },

    /// Module reached the Failed state
    ModuleFailed {
        module: String,
        error: String,
        detail: Option<String>,
    },

    /// The environment was abandoned because of a configuration error
    EnvironmentFailed { environment: String, error: String },

    /// Environment finished
    EnvironmentCompleted {
        environment: String,
        linked: usize,
        cloned: usize,
        failed: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - LogEventSink: tracing output to stdout and the log file
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }
}
