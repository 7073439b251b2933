//! `PostgreSQL` adapters for review persistence.

mod event;
mod models;
mod pull_request;
mod schema;

pub use event::PostgresEventLog;
pub use pull_request::PostgresPullRequestRepository;
