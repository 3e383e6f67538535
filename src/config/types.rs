//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::deploy::{DeployOptions, DEFAULT_WORKERS};
use crate::domain::value_objects::{DeployMode, Location, ModeSetting};
use crate::error::PostrunResult;
use crate::infrastructure::{DEFAULT_CLONE_TIMEOUT, DEFAULT_FACTER};
use crate::logging::DEFAULT_LOG_FILE;

use super::loader::{self, ConfigWarning};

/// Filesystem locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_environments")]
    pub environments: PathBuf,

    #[serde(default = "default_hieradata")]
    pub hieradata: PathBuf,

    #[serde(default = "default_local_modules")]
    pub local_modules: PathBuf,

    #[serde(default = "default_local_hiera")]
    pub local_hiera: PathBuf,

    /// Its existence switches `auto` mode to local
    #[serde(default = "default_vagrant_marker")]
    pub vagrant_marker: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            environments: default_environments(),
            hieradata: default_hieradata(),
            local_modules: default_local_modules(),
            local_hiera: default_local_hiera(),
            vagrant_marker: default_vagrant_marker(),
        }
    }
}

fn default_environments() -> PathBuf {
    PathBuf::from("/etc/puppetlabs/code/environments")
}

fn default_hieradata() -> PathBuf {
    PathBuf::from("/etc/puppetlabs/code/hieradata")
}

fn default_local_modules() -> PathBuf {
    PathBuf::from("/opt/puppet/modules")
}

fn default_local_hiera() -> PathBuf {
    PathBuf::from("/opt/puppet/hiera")
}

fn default_vagrant_marker() -> PathBuf {
    PathBuf::from("/vagrant")
}

/// git client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_git")]
    pub binary: PathBuf,

    /// Per-clone timeout
    #[serde(default = "default_git_timeout")]
    pub timeout_secs: u64,

    /// Concurrent clones
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: default_git(),
            timeout_secs: default_git_timeout(),
            workers: default_workers(),
        }
    }
}

fn default_git() -> PathBuf {
    PathBuf::from("git")
}

fn default_git_timeout() -> u64 {
    DEFAULT_CLONE_TIMEOUT.as_secs()
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

/// facter lookup of the `location` fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacterConfig {
    #[serde(default = "default_facter")]
    pub binary: PathBuf,

    #[serde(default = "default_facter_timeout")]
    pub timeout_secs: u64,
}

impl Default for FacterConfig {
    fn default() -> Self {
        Self {
            binary: default_facter(),
            timeout_secs: default_facter_timeout(),
        }
    }
}

fn default_facter() -> PathBuf {
    PathBuf::from(DEFAULT_FACTER)
}

fn default_facter_timeout() -> u64 {
    10
}

/// Log output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

/// Full configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mode: ModeSetting,

    /// Fixed location; facter is consulted when unset
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub facter: FacterConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration and return non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PostrunResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Configured location, if any non-blank one is set
    pub fn location(&self) -> Option<Location> {
        self.location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .map(Location::new)
    }

    pub fn deploy_mode(&self) -> DeployMode {
        self.mode.resolve(&self.paths.vagrant_marker)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git.timeout_secs.max(1))
    }

    pub fn facter_timeout(&self) -> Duration {
        Duration::from_secs(self.facter.timeout_secs.max(1))
    }

    pub fn workers(&self) -> usize {
        self.git.workers.max(1)
    }

    /// Orchestrator settings derived from this configuration
    pub fn deploy_options(&self) -> DeployOptions {
        DeployOptions::default()
            .with_local_modules(&self.paths.local_modules)
            .with_hiera_root(&self.paths.hieradata)
            .with_hiera_source(&self.paths.local_hiera)
            .with_workers(self.workers())
    }
}
