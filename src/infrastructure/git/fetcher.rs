//! Git module fetcher
//!
//! Implements the ModuleFetcher port with the git CLI for remote modules
//! and symlinks for locally staged ones.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::domain::entities::ModuleSpec;
use crate::domain::ports::{FetchError, FileSystem, ModuleFetcher};
use crate::domain::value_objects::NamingDelimiter;
use crate::infrastructure::fs::LocalFs;

use super::process::{run_with_timeout, ProcessError, Supervised};

/// Default upper bound for a single clone
pub const DEFAULT_CLONE_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches modules with `git clone --depth 1` or a local symlink
pub struct GitModuleFetcher<FS: FileSystem = LocalFs> {
    git: PathBuf,
    timeout: Duration,
    fs: FS,
}

impl GitModuleFetcher<LocalFs> {
    pub fn new(git: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self::with_fs(git, timeout, LocalFs::new())
    }
}

impl<FS: FileSystem> GitModuleFetcher<FS> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(git: impl Into<PathBuf>, timeout: Duration, fs: FS) -> Self {
        Self {
            git: git.into(),
            timeout,
            fs,
        }
    }

    /// The exact clone invocation for `spec`
    pub fn clone_command(&self, spec: &ModuleSpec, target: &Path) -> Command {
        let mut cmd = Command::new(&self.git);
        cmd.arg("clone")
            .arg("--depth")
            .arg("1")
            .arg(spec.source_url())
            .arg("-b")
            .arg(spec.git_ref())
            .arg(target)
            // Unreachable or private remotes must fail instead of prompting.
            .env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

impl<FS: FileSystem> ModuleFetcher for GitModuleFetcher<FS> {
    fn fetch_remote(&self, spec: &ModuleSpec, target_dir: &Path) -> Result<(), FetchError> {
        let target = target_dir.join(spec.name());
        let mut cmd = self.clone_command(spec, &target);

        match run_with_timeout(&mut cmd, self.timeout) {
            Ok(Supervised::Finished(captured)) if captured.status.success() => Ok(()),
            Ok(Supervised::Finished(captured)) => Err(FetchError::Exited {
                status: captured.status.to_string(),
                stderr: captured.stderr,
            }),
            Ok(Supervised::TimedOut) => Err(FetchError::TimedOut {
                timeout: self.timeout,
            }),
            Err(ProcessError::Spawn(source)) => Err(FetchError::Spawn {
                program: self.git.display().to_string(),
                source,
            }),
            Err(ProcessError::Io(e)) => Err(FetchError::Io(e)),
        }
    }

    fn fetch_local(
        &self,
        spec: &ModuleSpec,
        opt_root: &Path,
        target_dir: &Path,
        delimiter: NamingDelimiter,
    ) -> Result<PathBuf, FetchError> {
        let source = opt_root.join(delimiter.apply(spec.name()));
        let link = target_dir.join(spec.name());

        if !self.fs.exists(&source) {
            return Err(FetchError::Link {
                source_path: source,
                link,
                message: "staged module does not exist".to_string(),
            });
        }

        self.fs
            .symlink(&source, &link)
            .map_err(|e| FetchError::Link {
                source_path: source.clone(),
                link,
                message: e.to_string(),
            })?;
        Ok(source)
    }
}
