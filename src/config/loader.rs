//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ModeSetting;
use crate::error::{PostrunError, PostrunResult};

use super::types::Config;

pub use crate::domain::value_objects::ConfigWarning;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "POSTRUN_CONFIG";

/// Config file used when nothing else is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/puppetlabs/postrun.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PostrunResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| PostrunError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PostrunError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Config file to read: explicit path, then `$POSTRUN_CONFIG`, then the
/// system default when it exists
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    config_path_from(
        explicit,
        std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        Path::new(DEFAULT_CONFIG_PATH),
    )
}

pub(super) fn config_path_from(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    system_default: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    system_default
        .is_file()
        .then(|| system_default.to_path_buf())
}

/// Load the effective configuration: file (if any), then env overrides
///
/// A config file that was named explicitly must exist.
pub fn load(explicit: Option<&Path>) -> PostrunResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match resolve_config_path(explicit) {
        Some(path) => Config::load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (POSTRUN_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides looked up through `var`
///
/// Unparseable values are ignored.
pub fn apply_env_overrides<F>(mut config: Config, var: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // POSTRUN_MODE
    if let Some(mode) = var("POSTRUN_MODE").as_deref().and_then(ModeSetting::parse) {
        config.mode = mode;
    }

    // POSTRUN_LOCATION
    if let Some(location) = var("POSTRUN_LOCATION") {
        config.location = Some(location);
    }

    // POSTRUN_ENVIRONMENTS, POSTRUN_HIERADATA, POSTRUN_LOCAL_MODULES
    if let Some(path) = non_empty(var("POSTRUN_ENVIRONMENTS")) {
        config.paths.environments = PathBuf::from(path);
    }
    if let Some(path) = non_empty(var("POSTRUN_HIERADATA")) {
        config.paths.hieradata = PathBuf::from(path);
    }
    if let Some(path) = non_empty(var("POSTRUN_LOCAL_MODULES")) {
        config.paths.local_modules = PathBuf::from(path);
    }

    // POSTRUN_GIT
    if let Some(git) = non_empty(var("POSTRUN_GIT")) {
        config.git.binary = PathBuf::from(git);
    }

    // POSTRUN_GIT_TIMEOUT
    if let Some(secs) = var("POSTRUN_GIT_TIMEOUT").and_then(|v| v.trim().parse().ok()) {
        config.git.timeout_secs = secs;
    }

    // POSTRUN_WORKERS
    if let Some(workers) = var("POSTRUN_WORKERS").and_then(|v| v.trim().parse().ok()) {
        config.git.workers = workers;
    }

    // POSTRUN_LOG_FILE
    if let Some(file) = non_empty(var("POSTRUN_LOG_FILE")) {
        config.log.file = PathBuf::from(file);
    }

    config
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "mode",
        "location",
        "paths",
        "environments",
        "hieradata",
        "local_modules",
        "local_hiera",
        "vagrant_marker",
        "git",
        "binary",
        "timeout_secs",
        "workers",
        "facter",
        "log",
        "file",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
