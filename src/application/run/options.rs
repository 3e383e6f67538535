//! Run Options

use std::path::PathBuf;

use crate::domain::services::ModuleRequest;
use crate::domain::value_objects::{DeployMode, Location};

/// Inputs of one run, fully resolved before it starts
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory holding one subdirectory per environment
    pub environments: PathBuf,
    pub location: Location,
    pub mode: DeployMode,
    pub request: ModuleRequest,
}

impl RunOptions {
    pub fn new(environments: impl Into<PathBuf>, location: Location, mode: DeployMode) -> Self {
        Self {
            environments: environments.into(),
            location,
            mode,
            request: ModuleRequest::all(),
        }
    }

    pub fn with_request(mut self, request: ModuleRequest) -> Self {
        self.request = request;
        self
    }
}
