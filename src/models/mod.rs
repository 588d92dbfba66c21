//! Data models for the client view of PortfolioGen.
//!
//! These models mirror the backend's JSON wire shapes (camelCase) and carry
//! the client-local overlay state layered on top of the read-only source
//! records fetched from the repository host.

pub mod analysis;
pub mod profile;
pub mod repository;
pub mod snapshot;

// Re-exports for convenient access
pub use analysis::PortfolioAnalysis;
pub use profile::Profile;
pub use repository::{DashboardRepo, Repository};
pub use snapshot::{ResumeSnapshot, SavedRepository, SNAPSHOT_VERSION};
