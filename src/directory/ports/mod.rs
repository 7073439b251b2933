//! Port contracts for the team and user directory.
//!
//! Ports define infrastructure-agnostic interfaces used by directory and
//! review services.

pub mod repository;

pub use repository::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult};
