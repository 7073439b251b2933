//! Application services for team onboarding and user management.

mod directory;

pub use directory::{
    CreateTeamRequest, DirectoryServiceError, DirectoryServiceResult, TeamDirectoryService,
};
