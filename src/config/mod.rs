//! Configuration module for postrun
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (POSTRUN_*)
//! 3. Config file (`--config`, `$POSTRUN_CONFIG` or /etc/puppetlabs/postrun.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    apply_env_overrides, load, resolve_config_path, with_env_overrides, CONFIG_ENV_VAR,
    DEFAULT_CONFIG_PATH,
};
pub use types::{Config, FacterConfig, GitConfig, LogConfig, PathsConfig};
