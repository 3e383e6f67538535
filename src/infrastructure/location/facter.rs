//! Facter location lookup
//!
//! Asks `facter location` for the deployment site of this machine.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use crate::domain::ports::LocationResolver;
use crate::domain::value_objects::Location;
use crate::infrastructure::git::process::{run_with_timeout, Supervised};

/// Default facter binary of the Puppet agent packages
pub const DEFAULT_FACTER: &str = "/opt/puppetlabs/bin/facter";

/// Resolves the location fact via facter
#[derive(Debug, Clone)]
pub struct FacterLocation {
    binary: PathBuf,
    timeout: Duration,
}

impl FacterLocation {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

impl LocationResolver for FacterLocation {
    fn resolve(&self) -> Location {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("location");

        match run_with_timeout(&mut cmd, self.timeout) {
            Ok(Supervised::Finished(captured)) if captured.status.success() => {
                Location::new(captured.stdout)
            }
            _ => Location::default(),
        }
    }
}
