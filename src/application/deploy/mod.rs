//! Deploy use case

mod result;
mod use_case;

pub use result::DeployOutcome;
pub use use_case::DeployUseCase;
