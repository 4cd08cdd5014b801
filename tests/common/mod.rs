//! Common test utilities for sitedock integration tests.
//!
//! This module provides:
//! - `TestEnv`: isolated storage root plus use-case builders
//! - Test doubles: a filesystem that fails on demand, a store that
//!   refuses writes

pub mod doubles;
pub mod env;

pub use doubles::*;
pub use env::*;
