//! Logging setup
//!
//! Builds the `tracing` dispatcher for one run: a human-readable layer on
//! stdout and a plain layer appended to the log file. The dispatcher is
//! handed to [`crate::infrastructure::events::LogEventSink`] and installed
//! as the default only for the duration of the run, never globally.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use is_terminal::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::error::{PostrunError, PostrunResult};

/// Environment variable holding an `EnvFilter` directive that overrides `-v`
pub const LOG_FILTER_VAR: &str = "POSTRUN_LOG";

/// Default log file
pub const DEFAULT_LOG_FILE: &str = "/var/log/postrun.log";

/// Map `-v` occurrences to a level
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn filter_for(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()))
}

/// Open the log file for appending, creating parent directories
pub fn open_log_file(path: &Path) -> PostrunResult<File> {
    let open = || -> std::io::Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };
    open().map_err(|source| PostrunError::LogFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Dispatcher logging to stdout and, when given, a log file
///
/// A log file that cannot be opened is returned as a warning alongside a
/// stdout-only dispatcher.
pub fn dispatch(log_file: Option<&PathBuf>, level: LevelFilter) -> (Dispatch, Option<PostrunError>) {
    let (file, warning) = match log_file.map(|p| open_log_file(p)) {
        Some(Ok(file)) => (Some(file), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(std::io::stdout);
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    let subscriber = Registry::default()
        .with(filter_for(level))
        .with(stdout_layer)
        .with(file_layer);

    (Dispatch::new(subscriber), warning)
}

/// Dispatcher writing plain lines to an arbitrary writer
pub fn dispatch_to<W>(writer: W, level: LevelFilter) -> Dispatch
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = Registry::default().with(filter_for(level)).with(
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .without_time()
            .with_writer(writer),
    );
    Dispatch::new(subscriber)
}
