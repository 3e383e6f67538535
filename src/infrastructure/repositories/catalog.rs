//! YAML Catalog Repository
//!
//! Implements the CatalogRepository port over
//! `<environments>/<environment>/modules.yaml`.

use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;

use crate::domain::ports::catalog_repository::CatalogRepository;
use crate::domain::ports::file_system::{FileSystem, FsError};
use crate::error::{PostrunError, PostrunResult};
use crate::infrastructure::fs::LocalFs;

/// File name of the per-environment catalog
pub const CATALOG_FILE: &str = "modules.yaml";

/// Reads `modules.yaml` from each environment directory
pub struct YamlCatalogRepository<FS: FileSystem = LocalFs> {
    environments: PathBuf,
    fs: FS,
}

impl YamlCatalogRepository<LocalFs> {
    /// Create a repository rooted at the environments directory
    pub fn new(environments: impl Into<PathBuf>) -> Self {
        Self::with_fs(environments, LocalFs::new())
    }
}

impl<FS: FileSystem> YamlCatalogRepository<FS> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(environments: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            environments: environments.into(),
            fs,
        }
    }

    pub fn environments(&self) -> &Path {
        &self.environments
    }
}

impl<FS: FileSystem> CatalogRepository for YamlCatalogRepository<FS> {
    fn catalog_path(&self, environment: &str) -> PathBuf {
        self.environments.join(environment).join(CATALOG_FILE)
    }

    fn load(&self, environment: &str) -> PostrunResult<Option<Value>> {
        let path = self.catalog_path(environment);
        if !self.fs.is_file(&path) {
            return Ok(None);
        }

        let content = match self.fs.read(&path) {
            Ok(content) => content,
            Err(FsError::NotFound(_)) => return Ok(None),
            Err(e) => {
                return Err(PostrunError::InvalidCatalog {
                    file: path,
                    message: e.to_string(),
                })
            }
        };

        let document = serde_yaml_ng::from_str(&content).map_err(|e| {
            PostrunError::InvalidCatalog {
                file: path.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(Some(document))
    }
}
