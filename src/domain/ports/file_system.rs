//! FileSystem port - abstraction over the filesystem calls of a deployment
//!
//! The orchestrator only ever creates directories, removes entries, makes
//! symlinks and probes for existence. Keeping those behind a trait lets the
//! run loop and catalog be tested against temporary directories or mocks.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Classify an I/O error, keeping the path it happened on
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        FsError::at(Path::new(""), err)
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - test mocks recording calls in memory
pub trait FileSystem: Send + Sync {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Check if a path exists (following symlinks)
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Remove a file, symlink or directory tree
    ///
    /// Returns `Ok(false)` when nothing was there. Dangling symlinks are
    /// removed too.
    fn remove_all(&self, path: &Path) -> FsResult<bool>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Create `link` pointing at `source`
    fn symlink(&self, source: &Path, link: &Path) -> FsResult<()>;

    /// Names of the directories directly below `root`, sorted
    fn list_dirs(&self, root: &Path) -> FsResult<Vec<String>>;
}
