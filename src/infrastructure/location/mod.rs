//! Location Resolvers

mod facter;

pub use facter::{FacterLocation, DEFAULT_FACTER};
