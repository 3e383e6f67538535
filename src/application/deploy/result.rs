//! Deploy Result
//!
//! Result types for deploy operations.

use std::path::PathBuf;

/// Terminal state of one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleState {
    /// Symlinked to a locally staged copy
    Linked { source: PathBuf },
    /// Cloned from its remote
    Cloned,
    /// Could not be deployed
    Failed { reason: String },
}

impl ModuleState {
    pub fn is_failed(&self) -> bool {
        matches!(self, ModuleState::Failed { .. })
    }
}

/// Outcome of one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutcome {
    pub module: String,
    pub state: ModuleState,
}

/// Outcome of the hiera data relink
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HieraOutcome {
    /// Git mode leaves hiera data alone
    #[default]
    Skipped,
    Linked { link: PathBuf, source: PathBuf },
    Failed { link: PathBuf, error: String },
}

/// Result of deploying one environment
#[derive(Debug, Clone, Default)]
pub struct DeploymentReport {
    pub environment: String,
    pub hiera: HieraOutcome,
    /// One entry per module, ordered by module name
    pub outcomes: Vec<ModuleOutcome>,
}

impl DeploymentReport {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            ..Self::default()
        }
    }

    pub fn linked_count(&self) -> usize {
        self.count(|s| matches!(s, ModuleState::Linked { .. }))
    }

    pub fn cloned_count(&self) -> usize {
        self.count(|s| matches!(s, ModuleState::Cloned))
    }

    pub fn failed_count(&self) -> usize {
        self.count(ModuleState::is_failed)
    }

    pub fn state_of(&self, module: &str) -> Option<&ModuleState> {
        self.outcomes
            .iter()
            .find(|o| o.module == module)
            .map(|o| &o.state)
    }

    /// True when every module was deployed
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// One-line summary, e.g. `production: 1 linked, 2 cloned, 0 failed`
    pub fn summary(&self) -> String {
        format!(
            "{}: {} linked, {} cloned, {} failed",
            self.environment,
            self.linked_count(),
            self.cloned_count(),
            self.failed_count()
        )
    }

    fn count(&self, predicate: impl Fn(&ModuleState) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.state)).count()
    }
}
