//! Application layer
//!
//! Use cases orchestrating the domain services with the filesystem and
//! store ports. All business rules live in the domain layer; these types
//! sequence them and own the write-phase locking.

pub mod deploy;
pub mod remove;
pub mod serve;

pub use deploy::{DeployOutcome, DeployUseCase};
pub use remove::{RemoveOutcome, RemoveUseCase};
pub use serve::{ServeOutcome, ServeUseCase, INDEX_FILE};
