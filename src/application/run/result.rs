//! Run Result

use crate::application::deploy::DeploymentReport;

/// An environment abandoned before deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentFailure {
    pub environment: String,
    pub error: String,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One report per deployed environment, in environment order
    pub reports: Vec<DeploymentReport>,
    pub failed_environments: Vec<EnvironmentFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed_environments.is_empty()
    }

    /// Process exit status; module failures alone keep it at zero
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn report(&self, environment: &str) -> Option<&DeploymentReport> {
        self.reports.iter().find(|r| r.environment == environment)
    }

    pub fn failed_modules(&self) -> usize {
        self.reports.iter().map(|r| r.failed_count()).sum()
    }
}
