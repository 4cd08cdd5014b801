//! Domain value objects
//!
//! Immutable, validated value types. Anything that ends up in a storage path
//! or a URL is parsed into one of these before the engine acts on it.

mod host;
mod mode;
mod safe_path;
mod site_name;
mod subdomain;

pub use host::{is_plausible_domain, PlatformHost};
pub use mode::AddressingMode;
pub use safe_path::{PathError, SafePath};
pub use site_name::SiteName;
pub use subdomain::SubdomainLabel;
