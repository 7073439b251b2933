//! Pull request review lifecycle.
//!
//! Chooses reviewers when a pull request is opened, replaces a reviewer
//! mid-review, merges pull requests, and appends an audit event for every
//! lifecycle occurrence. Audit writes are best-effort: a failed write is
//! logged and never undoes the state change it describes. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
