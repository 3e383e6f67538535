//! Location Resolver port

use crate::domain::value_objects::Location;

/// Determines the deployment-site identifier of this machine
///
/// Implementations never fail: anything that prevents a lookup yields
/// [`Location::default`].
pub trait LocationResolver {
    fn resolve(&self) -> Location;
}

/// Resolver returning a fixed, configured location
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Location);

impl LocationResolver for FixedLocation {
    fn resolve(&self) -> Location {
        self.0.clone()
    }
}
