//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use std::path::Path;

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove_all(&self, path: &Path) -> FsResult<bool> {
        // symlink_metadata so dangling links and links to directories are
        // unlinked instead of followed
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(FsError::at(path, e)),
        };

        let result = if metadata.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };
        result.map(|_| true).map_err(|e| FsError::at(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn symlink(&self, source: &Path, link: &Path) -> FsResult<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(source, link).map_err(|e| FsError::at(link, e))
        }
        #[cfg(not(unix))]
        {
            let _ = (source, link);
            Err(FsError::Other(
                "symlinks are only supported on unix".to_string(),
            ))
        }
    }

    fn list_dirs(&self, root: &Path) -> FsResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(root).map_err(|e| FsError::at(root, e))? {
            let entry = entry.map_err(|e| FsError::at(root, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
