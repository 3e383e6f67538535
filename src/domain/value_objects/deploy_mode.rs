//! Deploy mode value object
//!
//! - `Git`: every module is cloned from its remote
//! - `Local`: modules staged on the machine are symlinked, the rest cloned

use std::path::Path;

use serde::{Deserialize, Serialize};

/// How modules are materialized for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeployMode {
    #[default]
    Git,
    Local,
}

impl DeployMode {
    pub fn is_local(&self) -> bool {
        matches!(self, DeployMode::Local)
    }

    /// Local when the Vagrant marker path exists
    pub fn detect(vagrant_marker: &Path) -> Self {
        if vagrant_marker.exists() {
            DeployMode::Local
        } else {
            DeployMode::Git
        }
    }
}

impl std::fmt::Display for DeployMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployMode::Git => write!(f, "git"),
            DeployMode::Local => write!(f, "local"),
        }
    }
}

/// Configured mode; `Auto` defers to [`DeployMode::detect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    #[default]
    Auto,
    Git,
    Local,
}

impl ModeSetting {
    pub fn resolve(self, vagrant_marker: &Path) -> DeployMode {
        match self {
            ModeSetting::Auto => DeployMode::detect(vagrant_marker),
            ModeSetting::Git => DeployMode::Git,
            ModeSetting::Local => DeployMode::Local,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ModeSetting::Auto),
            "git" => Some(ModeSetting::Git),
            "local" | "vagrant" => Some(ModeSetting::Local),
            _ => None,
        }
    }
}
