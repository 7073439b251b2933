//! Domain model for teams and their members.
//!
//! A user belongs to at most one team. The active flag gates whether a user
//! may be chosen as a reviewer; inactive users stay in the directory.

mod error;
mod ids;
mod team;
mod user;

pub use error::DirectoryDomainError;
pub use ids::{TeamName, UserId};
pub use team::{Team, TeamMember};
pub use user::{PersistedUserData, User};
