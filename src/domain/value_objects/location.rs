//! Location value object - the deployment-site identifier
//!
//! The location selects which module set of a catalog applies. Machines
//! without a location fact deploy the `default` set.

/// Name of the fallback location every catalog is expected to carry
pub const DEFAULT_LOCATION: &str = "default";

/// Deployment-site identifier (e.g. a datacenter name)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    /// Build a location, falling back to `default` for blank input
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        if name.is_empty() {
            Self::default()
        } else {
            Self(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_LOCATION
    }
}

impl Default for Location {
    fn default() -> Self {
        Self(DEFAULT_LOCATION.to_string())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
