//! Git Integration
//!
//! The git CLI behind the ModuleFetcher port, plus the subprocess
//! supervisor it shares with the facter location lookup.

mod fetcher;
pub(crate) mod process;

pub use fetcher::{GitModuleFetcher, DEFAULT_CLONE_TIMEOUT};
