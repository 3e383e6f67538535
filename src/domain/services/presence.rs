//! Local presence check
//!
//! Decides whether a module has a pre-staged copy under the local module
//! root, and under which naming convention it was staged.

use std::path::Path;

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::NamingDelimiter;

/// Outcome of a presence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceResult {
    pub exists: bool,
    pub delimiter: NamingDelimiter,
}

/// Probes the local staging root for modules
pub struct LocalPresenceChecker<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
}

impl<'a, FS: FileSystem + ?Sized> LocalPresenceChecker<'a, FS> {
    pub fn new(fs: &'a FS) -> Self {
        Self { fs }
    }

    /// Check `opt_root` for `module_name` in dash and underscore form
    ///
    /// The underscore form wins when both exist.
    pub fn check(&self, module_name: &str, opt_root: &Path) -> PresenceResult {
        let dash = opt_root.join(NamingDelimiter::Dash.apply(module_name));
        let underscore = opt_root.join(NamingDelimiter::Underscore.apply(module_name));

        let has_underscore = self.fs.exists(&underscore);
        let exists = has_underscore || self.fs.exists(&dash);
        let delimiter = if has_underscore {
            NamingDelimiter::Underscore
        } else {
            NamingDelimiter::Dash
        };

        PresenceResult { exists, delimiter }
    }
}
