//! Test environment builder for isolated postrun runs.
//!
//! Provides `TestEnv` - a temp directory holding every path postrun
//! touches, a `postrun.toml` pointing at them and a fake `git`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures::FAKE_GIT;

/// Variables that would leak host configuration into a run
const POSTRUN_VARS: &[&str] = &[
    "POSTRUN_CONFIG",
    "POSTRUN_LOG",
    "POSTRUN_MODE",
    "POSTRUN_LOCATION",
    "POSTRUN_ENVIRONMENTS",
    "POSTRUN_HIERADATA",
    "POSTRUN_LOCAL_MODULES",
    "POSTRUN_GIT",
    "POSTRUN_GIT_TIMEOUT",
    "POSTRUN_WORKERS",
    "POSTRUN_LOG_FILE",
];

/// Result of running the postrun binary
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated postrun installation
pub struct TestEnv {
    pub root: TempDir,
    mode: &'static str,
    location: Option<String>,
}

impl TestEnv {
    /// Git mode, location `dc1`
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        for dir in ["environments", "hieradata", "opt/modules", "opt/hiera", "bin"] {
            fs::create_dir_all(root.path().join(dir)).unwrap();
        }

        let git = root.path().join("bin/git");
        fs::write(&git, FAKE_GIT).unwrap();
        fs::set_permissions(&git, fs::Permissions::from_mode(0o755)).unwrap();

        let env = Self {
            root,
            mode: "git",
            location: Some("dc1".to_string()),
        };
        env.write_config();
        env
    }

    /// Deploy in local (Vagrant) mode
    pub fn local(mut self) -> Self {
        self.mode = "local";
        self.write_config();
        self
    }

    /// Leave the location to facter (which is absent, so `default`)
    pub fn without_location(mut self) -> Self {
        self.location = None;
        self.write_config();
        self
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path("postrun.toml")
    }

    pub fn environments(&self) -> PathBuf {
        self.path("environments")
    }

    pub fn dist(&self, environment: &str) -> PathBuf {
        self.environments().join(environment).join("dist")
    }

    pub fn log_file(&self) -> PathBuf {
        self.path("log/postrun.log")
    }

    fn write_config(&self) {
        let location = self
            .location
            .as_ref()
            .map(|l| format!("location = \"{}\"\n", l))
            .unwrap_or_default();
        let config = format!(
            r#"mode = "{mode}"
{location}
[paths]
environments = "{root}/environments"
hieradata = "{root}/hieradata"
local_modules = "{root}/opt/modules"
local_hiera = "{root}/opt/hiera"
vagrant_marker = "{root}/vagrant"

[git]
binary = "{root}/bin/git"
timeout_secs = 1
workers = 4

[facter]
binary = "{root}/bin/facter"
timeout_secs = 1

[log]
file = "{root}/log/postrun.log"
"#,
            mode = self.mode,
            location = location,
            root = self.root.path().display(),
        );
        fs::write(self.config_path(), config).unwrap();
    }

    /// Create an environment, with a catalog when given
    pub fn add_environment(&self, name: &str, catalog: Option<&str>) -> &Self {
        let dir = self.environments().join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(yaml) = catalog {
            fs::write(dir.join("modules.yaml"), yaml).unwrap();
        }
        self
    }

    /// Stage a local checkout under the local modules root
    pub fn stage_module(&self, dir_name: &str) -> PathBuf {
        let dir = self.path("opt/modules").join(dir_name);
        fs::create_dir_all(dir.join("manifests")).unwrap();
        dir
    }

    /// Ref recorded by the fake git for a cloned module
    pub fn cloned_ref(&self, environment: &str, module: &str) -> Option<String> {
        fs::read_to_string(self.dist(environment).join(module).join("REF"))
            .ok()
            .map(|s| s.trim().to_string())
    }

    /// Run postrun with this environment's config
    pub fn run(&self, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_postrun"));
        cmd.arg("--config").arg(self.config_path()).args(args);
        for var in POSTRUN_VARS {
            cmd.env_remove(var);
        }
        output_to_result(cmd.output().expect("Failed to execute postrun"))
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Whether `path` itself is a symlink
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}
