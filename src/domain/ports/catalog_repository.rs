//! Catalog Repository port
//!
//! Loads the raw per-environment catalog document. Interpretation of the
//! document lives in [`crate::domain::services::ModuleCatalog`].

use std::path::PathBuf;

use serde_yaml_ng::Value;

use crate::error::PostrunResult;

/// Source of per-environment `modules.yaml` documents
pub trait CatalogRepository {
    /// Where the catalog of `environment` is expected
    fn catalog_path(&self, environment: &str) -> PathBuf;

    /// Parse the catalog of `environment`
    ///
    /// Returns `Ok(None)` when the environment has no catalog file.
    fn load(&self, environment: &str) -> PostrunResult<Option<Value>>;
}
