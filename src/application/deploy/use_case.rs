//! Deployment Orchestrator
//!
//! Deploys one environment:
//! 1. In Local mode, re-point the environment's hiera data symlink
//! 2. For every module, concurrently on a bounded worker pool:
//!    - remove whatever a previous run left at `dist/<module>`
//!    - link the staged copy (Local mode, when present) or clone the remote
//! 3. Wait for all workers and collect one outcome per module
//!
//! A failing module never stops its siblings. The hiera relink finishes
//! before any worker is dispatched.

use std::path::PathBuf;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::domain::entities::ModuleSpec;
use crate::domain::ports::{DeployEvent, DeployEventSink, FileSystem, ModuleFetcher};
use crate::domain::services::LocalPresenceChecker;
use crate::error::PostrunResult;

use super::options::{DeployOptions, DeploymentRequest};
use super::result::{DeploymentReport, HieraOutcome, ModuleOutcome, ModuleState};

/// Drives a [`ModuleFetcher`] across one environment's module set
pub struct DeploymentOrchestrator<FS, MF>
where
    FS: FileSystem,
    MF: ModuleFetcher,
{
    fs: FS,
    fetcher: MF,
    options: DeployOptions,
    pool: ThreadPool,
}

impl<FS, MF> DeploymentOrchestrator<FS, MF>
where
    FS: FileSystem,
    MF: ModuleFetcher,
{
    pub fn new(fs: FS, fetcher: MF, options: DeployOptions) -> PostrunResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(options.workers.max(1))
            .thread_name(|i| format!("postrun-fetch-{}", i))
            .build()?;

        Ok(Self {
            fs,
            fetcher,
            options,
            pool,
        })
    }

    pub fn options(&self) -> &DeployOptions {
        &self.options
    }

    pub fn fetcher(&self) -> &MF {
        &self.fetcher
    }

    /// Deploy every module of `request`, blocking until all are done
    pub fn deploy(
        &self,
        request: &DeploymentRequest,
        events: &dyn DeployEventSink,
    ) -> DeploymentReport {
        let hiera = if request.mode.is_local() {
            self.link_hiera(&request.environment, events)
        } else {
            HieraOutcome::Skipped
        };

        // One task per module, so a quick link is never queued behind a
        // slow clone in the same split.
        let specs: Vec<&ModuleSpec> = request.modules.iter().collect();
        let outcomes = self.pool.install(|| {
            specs
                .par_iter()
                .with_max_len(1)
                .map(|spec| self.deploy_module(spec, request, events))
                .collect::<Vec<_>>()
        });

        let report = DeploymentReport {
            environment: request.environment.clone(),
            hiera,
            outcomes,
        };
        events.on_event(DeployEvent::EnvironmentCompleted {
            environment: report.environment.clone(),
            linked: report.linked_count(),
            cloned: report.cloned_count(),
            failed: report.failed_count(),
        });
        report
    }

    /// Replace `<hiera_root>/<environment>` with a link to the shared data
    fn link_hiera(&self, environment: &str, events: &dyn DeployEventSink) -> HieraOutcome {
        let link = self.options.hiera_root.join(environment);
        let source = self.options.hiera_source.clone();

        let result = self
            .fs
            .create_dir_all(&self.options.hiera_root)
            .and_then(|_| self.fs.remove_all(&link))
            .and_then(|_| self.fs.symlink(&source, &link));

        match result {
            Ok(()) => {
                events.on_event(DeployEvent::HieraLinked {
                    link: link.clone(),
                    source: source.clone(),
                });
                HieraOutcome::Linked { link, source }
            }
            Err(e) => {
                let error = e.to_string();
                events.on_event(DeployEvent::HieraFailed {
                    link: link.clone(),
                    error: error.clone(),
                });
                HieraOutcome::Failed { link, error }
            }
        }
    }

    /// Pre-clean then fetch a single module; runs on a pool worker
    fn deploy_module(
        &self,
        spec: &ModuleSpec,
        request: &DeploymentRequest,
        events: &dyn DeployEventSink,
    ) -> ModuleOutcome {
        let target = request.target_dir.join(spec.name());

        match self.fs.remove_all(&target) {
            Ok(true) => events.on_event(DeployEvent::ModuleRemoved {
                module: spec.name().to_string(),
                path: target.clone(),
            }),
            Ok(false) => {}
            Err(e) => {
                // Fetching on top of leftovers would mix two revisions.
                let reason = format!("cannot remove {}: {}", target.display(), e);
                return self.failed(spec, reason, None, events);
            }
        }

        if request.mode.is_local() {
            let opt_root = &self.options.local_modules;
            let presence = LocalPresenceChecker::new(&self.fs).check(spec.name(), opt_root);
            if presence.exists {
                events.on_event(DeployEvent::ModuleLinking {
                    module: spec.name().to_string(),
                    source: opt_root.join(presence.delimiter.apply(spec.name())),
                });
                return match self.fetcher.fetch_local(
                    spec,
                    opt_root,
                    &request.target_dir,
                    presence.delimiter,
                ) {
                    Ok(source) => self.linked(spec, source, events),
                    Err(e) => self.failed(spec, e.to_string(), None, events),
                };
            }
        }

        events.on_event(DeployEvent::ModuleCloning {
            module: spec.name().to_string(),
            url: spec.source_url().to_string(),
            git_ref: spec.git_ref().to_string(),
        });
        match self.fetcher.fetch_remote(spec, &request.target_dir) {
            Ok(()) => {
                events.on_event(DeployEvent::ModuleCloned {
                    module: spec.name().to_string(),
                });
                ModuleOutcome {
                    module: spec.name().to_string(),
                    state: ModuleState::Cloned,
                }
            }
            Err(e) => {
                // Drop a half-written clone so the next run starts clean.
                let _ = self.fs.remove_all(&target);
                let detail = e.detail().map(str::to_string);
                self.failed(spec, e.to_string(), detail, events)
            }
        }
    }

    fn linked(
        &self,
        spec: &ModuleSpec,
        source: PathBuf,
        events: &dyn DeployEventSink,
    ) -> ModuleOutcome {
        events.on_event(DeployEvent::ModuleLinked {
            module: spec.name().to_string(),
            source: source.clone(),
        });
        ModuleOutcome {
            module: spec.name().to_string(),
            state: ModuleState::Linked { source },
        }
    }

    fn failed(
        &self,
        spec: &ModuleSpec,
        reason: String,
        detail: Option<String>,
        events: &dyn DeployEventSink,
    ) -> ModuleOutcome {
        events.on_event(DeployEvent::ModuleFailed {
            module: spec.name().to_string(),
            error: reason.clone(),
            detail,
        });
        ModuleOutcome {
            module: spec.name().to_string(),
            state: ModuleState::Failed { reason },
        }
    }
}
