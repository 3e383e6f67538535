//! Log Event Sink
//!
//! Renders deploy events as `tracing` log lines through an explicitly
//! owned dispatcher, so events raised on worker threads reach the same
//! stdout and file layers as the main thread.

use tracing::{debug, error, info, Dispatch};

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that logs through a `tracing` dispatcher
pub struct LogEventSink {
    dispatch: Dispatch,
}

impl LogEventSink {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

impl DeployEventSink for LogEventSink {
    fn on_event(&self, event: DeployEvent) {
        tracing::dispatcher::with_default(&self.dispatch, || log_event(event));
    }
}

fn log_event(event: DeployEvent) {
    match event {
        DeployEvent::RunStarted {
            location,
            mode,
            environment_count,
        } => {
            info!(
                "Deploying {} environment(s) for location {} in {} mode",
                environment_count, location, mode
            );
        }

        DeployEvent::EnvironmentStarted { environment } => {
            info!("Postrunning for environment {}", environment);
        }

        DeployEvent::CatalogMissing { environment, path } => {
            error!("{} not found for {}", path.display(), environment);
        }

        DeployEvent::LocationFallback {
            environment,
            location,
        } => {
            info!(
                "configuration for location {} not found in {}, using default",
                location, environment
            );
        }

        DeployEvent::ModuleNotFound {
            environment,
            module,
        } => {
            error!("Module {} not found in configuration of {}", module, environment);
        }

        DeployEvent::HieraLinked { link, source } => {
            debug!("Linked hiera data {} -> {}", link.display(), source.display());
        }

        DeployEvent::HieraFailed { link, error } => {
            error!("Error while linking hiera data {}: {}", link.display(), error);
        }

        DeployEvent::ModuleRemoved { module, path } => {
            debug!("Removed {} ({})", path.display(), module);
        }

        DeployEvent::ModuleLinking { module, source } => {
            debug!("Deploying local {} from {}", module, source.display());
        }

        DeployEvent::ModuleCloning {
            module,
            url,
            git_ref,
        } => {
            debug!("Deploying git {} with branch {} from {}", module, git_ref, url);
        }

        DeployEvent::ModuleLinked { module, .. } => {
            debug!("Linked {}", module);
        }

        DeployEvent::ModuleCloned { module } => {
            debug!("Cloned {}", module);
        }

        DeployEvent::ModuleFailed {
            module,
            error,
            detail,
        } => {
            error!("Error while deploying {}: {}", module, error);
            if let Some(detail) = detail {
                debug!("{}", detail);
            }
        }

        DeployEvent::EnvironmentFailed { environment, error } => {
            error!("Skipping environment {}: {}", environment, error);
        }

        DeployEvent::EnvironmentCompleted {
            environment,
            linked,
            cloned,
            failed,
        } => {
            info!(
                "{}: {} linked, {} cloned, {} failed",
                environment, linked, cloned, failed
            );
        }
    }
}
