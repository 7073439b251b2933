//! Pull request reviewer assignment and lifecycle engine.
//!
//! This crate chooses reviewers for new pull requests, replaces reviewers
//! mid-review, merges pull requests, and keeps an append-only audit log of
//! everything that happened, with statistics over that log.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`directory`]: Teams, users, and team membership
//! - [`review`]: Reviewer selection, the pull request lifecycle, and audit
//!   events
//! - [`error`]: Error classification shared by every service
//! - [`config`], [`telemetry`], [`db`]: Process configuration, logging, and
//!   connection pooling

pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod review;
pub mod telemetry;
