//! Naming delimiter of locally staged modules
//!
//! Upstream module repositories are named inconsistently, so a module
//! called `apt_mirror` may be staged as `apt_mirror` or `apt-mirror`.

/// Word separator used in a staged module directory name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamingDelimiter {
    /// `apt_mirror`
    Underscore,
    /// `apt-mirror` (the conventional form)
    #[default]
    Dash,
}

impl NamingDelimiter {
    /// Staged directory name of `module` under this convention
    pub fn apply(self, module: &str) -> String {
        module.replace('_', self.as_str())
    }

    fn as_str(self) -> &'static str {
        match self {
            NamingDelimiter::Underscore => "_",
            NamingDelimiter::Dash => "-",
        }
    }
}

impl std::fmt::Display for NamingDelimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
