//! Team and user directory.
//!
//! Resolves which team a user belongs to and which users make up a team.
//! Teams are the unit of user onboarding: creating a team upserts every
//! listed member as a user record. The module follows hexagonal
//! architecture:
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
