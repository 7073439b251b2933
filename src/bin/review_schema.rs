//! Applies the bundled review schema to the configured database.
//!
//! Usage:
//!
//! ```text
//! review_schema [up|down]
//! ```
//!
//! Connection settings come from the `DB_*` environment variables (see
//! [`pr_review::config::ServiceConfig`]). `up` is the default and is safe to
//! re-run; `down` drops every review table.

use diesel::connection::SimpleConnection;
use pr_review::config::ServiceConfig;
use pr_review::db::build_pool;
use pr_review::telemetry::init_tracing;
use thiserror::Error;

const UP_SQL: &str = include_str!("../../migrations/2026-10-19-000000_create_review_tables/up.sql");
const DOWN_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_review_tables/down.sql");

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum SchemaError {
    #[error("unknown direction '{0}'; expected up or down")]
    UnknownDirection(String),
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    fn parse(arg: Option<&str>) -> Result<Self, SchemaError> {
        match arg {
            None | Some("up") => Ok(Self::Up),
            Some("down") => Ok(Self::Down),
            Some(other) => Err(SchemaError::UnknownDirection(other.to_owned())),
        }
    }

    const fn sql(self) -> &'static str {
        match self {
            Self::Up => UP_SQL,
            Self::Down => DOWN_SQL,
        }
    }
}

fn main() -> Result<(), BoxError> {
    let direction = Direction::parse(std::env::args().nth(1).as_deref())?;
    let config = ServiceConfig::from_env()?;
    init_tracing(&config.logging)?;

    let pool = build_pool(&config.database, &config.pool)?;
    let mut connection = pool.get()?;
    connection.batch_execute(direction.sql())?;

    tracing::info!(?direction, database = %config.database.name, "review schema applied");
    Ok(())
}
