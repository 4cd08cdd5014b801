//! Sitedock - multi-tenant static site deployment and routing engine
//!
//! Sitedock decides where a tenant's uploaded site lives on durable storage,
//! how it is addressed going forward (per-tenant path, subdomain simulation
//! path, or real DNS host), and how an inbound request resolves back to a
//! concrete file to serve.
//!
//! The crate is the core engine only. Authentication, multipart upload
//! decoding, and HTTP response writing are external collaborators that talk
//! to the engine through the ports defined in `domain::ports`.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::deploy::{DeployOutcome, DeployUseCase};
pub use application::remove::{RemoveOutcome, RemoveUseCase};
pub use application::serve::{ServeOutcome, ServeUseCase};
pub use config::EngineConfig;
pub use domain::entities::{
    Deployment, DeploymentId, DeploymentStatus, Descriptor, StagedFile, TenantId,
};
pub use domain::services::{AddressingMode, PathResolver, RequestRouter, Resolution};
pub use error::{EngineError, EngineResult};
