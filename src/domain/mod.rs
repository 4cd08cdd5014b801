//! Domain layer
//!
//! Pure business logic without I/O dependencies.
//!
//! - `entities/` - deployment records and transient upload tuples
//! - `value_objects/` - validated immutable types (paths, labels, hosts)
//! - `services/` - resolver and router (pure functions over config)
//! - `ports/` - interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
