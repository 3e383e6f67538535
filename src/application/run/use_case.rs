//! Run Use Case
//!
//! Walks every environment under the environments root in name order.
//! Configuration errors abandon one environment and are collected in the
//! summary; only an unreadable environments root aborts the run.

use crate::application::deploy::{DeploymentOrchestrator, DeploymentReport, DeploymentRequest};
use crate::domain::ports::{
    CatalogRepository, DeployEvent, DeployEventSink, FileSystem, ModuleFetcher,
};
use crate::domain::services::ModuleCatalog;
use crate::error::{PostrunError, PostrunResult};

use super::options::RunOptions;
use super::result::{EnvironmentFailure, RunSummary};

/// Environment loop of a postrun run
pub struct RunUseCase<R, FS, DFS, MF>
where
    R: CatalogRepository,
    FS: FileSystem,
    DFS: FileSystem,
    MF: ModuleFetcher,
{
    catalog: ModuleCatalog<R>,
    fs: FS,
    orchestrator: DeploymentOrchestrator<DFS, MF>,
}

impl<R, FS, DFS, MF> RunUseCase<R, FS, DFS, MF>
where
    R: CatalogRepository,
    FS: FileSystem,
    DFS: FileSystem,
    MF: ModuleFetcher,
{
    pub fn new(repository: R, fs: FS, orchestrator: DeploymentOrchestrator<DFS, MF>) -> Self {
        Self {
            catalog: ModuleCatalog::new(repository),
            fs,
            orchestrator,
        }
    }

    /// Deploy every environment
    ///
    /// Fails only when the environments root cannot be listed.
    pub fn run(
        &self,
        options: &RunOptions,
        events: &dyn DeployEventSink,
    ) -> PostrunResult<RunSummary> {
        let environments = self.fs.list_dirs(&options.environments).map_err(|source| {
            PostrunError::EnvironmentsRootMissing {
                path: options.environments.clone(),
                source,
            }
        })?;

        events.on_event(DeployEvent::RunStarted {
            location: options.location.to_string(),
            mode: options.mode.to_string(),
            environment_count: environments.len(),
        });

        let mut summary = RunSummary::default();
        for environment in environments {
            events.on_event(DeployEvent::EnvironmentStarted {
                environment: environment.clone(),
            });

            match self.run_environment(&environment, options, events) {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    let error = e.to_string();
                    events.on_event(DeployEvent::EnvironmentFailed {
                        environment: environment.clone(),
                        error: error.clone(),
                    });
                    summary
                        .failed_environments
                        .push(EnvironmentFailure { environment, error });
                }
            }
        }

        Ok(summary)
    }

    fn run_environment(
        &self,
        environment: &str,
        options: &RunOptions,
        events: &dyn DeployEventSink,
    ) -> PostrunResult<DeploymentReport> {
        let target_dir = options.environments.join(environment).join("dist");
        self.fs.create_dir_all(&target_dir)?;
        self.fs
            .create_dir_all(&self.orchestrator.options().hiera_root.join(environment))?;

        let modules =
            self.catalog
                .resolve(environment, &options.location, &options.request, events)?;

        let request = DeploymentRequest::new(environment, target_dir, options.mode, modules);
        Ok(self.orchestrator.deploy(&request, events))
    }
}
