//! postrun CLI
//!
//! Usage: postrun [-v] [-m <MODULE> [-b <REF>]] [--config <FILE>]
//!
//! Exit status: 0 when every environment was processed (clone failures
//! included), 1 when an environment had a configuration error, 2 when
//! the run could not start.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use postrun::application::{DeploymentOrchestrator, RunOptions, RunUseCase};
use postrun::config::{self, ConfigWarning};
use postrun::domain::ports::{FixedLocation, LocationResolver};
use postrun::infrastructure::{
    FacterLocation, GitModuleFetcher, LocalFs, LogEventSink, YamlCatalogRepository,
};
use postrun::logging;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let (config, warnings) =
        config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let config = cli.apply(config);
    print_config_warnings(&warnings);

    let (dispatch, log_warning) =
        logging::dispatch(Some(&config.log.file), logging::level_for(cli.verbose));
    if let Some(e) = log_warning {
        eprintln!("Warning: {}; logging to stdout only", e);
    }
    let sink = LogEventSink::new(dispatch);

    let resolver: Box<dyn LocationResolver> = match config.location() {
        Some(location) => Box::new(FixedLocation(location)),
        None => Box::new(FacterLocation::new(
            &config.facter.binary,
            config.facter_timeout(),
        )),
    };
    let location = resolver.resolve();
    let mode = config.deploy_mode();

    let fetcher = GitModuleFetcher::new(&config.git.binary, config.git_timeout());
    let orchestrator = DeploymentOrchestrator::new(LocalFs::new(), fetcher, config.deploy_options())
        .context("failed to start deployment workers")?;
    let use_case = RunUseCase::new(
        YamlCatalogRepository::new(&config.paths.environments),
        LocalFs::new(),
        orchestrator,
    );

    let options = RunOptions::new(&config.paths.environments, location, mode)
        .with_request(cli.module_request());

    match use_case.run(&options, &sink) {
        Ok(summary) => Ok(ExitCode::from(summary.exit_code())),
        Err(e) => {
            let e = anyhow::Error::new(e);
            tracing::dispatcher::with_default(sink.dispatch(), || {
                tracing::error!("{:#}", e);
            });
            Ok(ExitCode::from(2))
        }
    }
}

fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}
