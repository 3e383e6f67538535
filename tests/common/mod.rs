//! Common test utilities for postrun CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated environments root, hiera root, staging root and fake git
//! - Fixtures: Reusable catalog content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
