//! Error types for postrun
//!
//! Uses `thiserror` for library errors. Per-module fetch failures use
//! [`crate::domain::ports::FetchError`] and never surface here.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for postrun operations
pub type PostrunResult<T> = Result<T, PostrunError>;

/// Main error type for postrun operations
#[derive(Error, Debug)]
pub enum PostrunError {
    /// The environments root could not be listed
    #[error("environments directory not found: {path}")]
    EnvironmentsRootMissing {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// Neither the requested location nor `default` is configured
    #[error("no modules configured for location '{location}' or 'default' in {environment}")]
    LocationMissing {
        environment: String,
        location: String,
    },

    /// modules.yaml has the wrong shape
    #[error("invalid module catalog {file}: {message}")]
    InvalidCatalog { file: PathBuf, message: String },

    /// A module entry has an unusable name, url or ref
    #[error("invalid module '{module}' in {environment}: {message}")]
    InvalidModule {
        environment: String,
        module: String,
        message: String,
    },

    /// Invalid postrun.toml
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Log file could not be opened
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Filesystem error while preparing an environment
    #[error("filesystem error: {0}")]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
