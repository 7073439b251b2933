//! In-memory adapters for directory persistence.

mod directory;

pub use directory::InMemoryDirectory;
