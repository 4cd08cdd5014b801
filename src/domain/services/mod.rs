//! Domain services
//!
//! Stateless, pure logic: descriptor resolution and request routing.
//! Neither service performs I/O; the application layer combines them with
//! the filesystem and store ports.

pub mod resolver;
pub mod router;

pub use resolver::{PathResolver, Resolution, SUBDOMAINS_DIR, TENANTS_DIR};
pub use router::{RequestRouter, RouteMatch, RouteOutcome, SiteRef};

// Re-exported here because the mode is part of a resolution.
pub use crate::domain::value_objects::AddressingMode;
