//! Event Sink Implementations
//!
//! Provides concrete implementations of DeployEventSink:
//! - LogEventSink: tracing output to stdout and the log file

mod log;

pub use log::LogEventSink;
