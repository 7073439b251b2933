//! `PostgreSQL` connection pool construction.

use crate::config::{DatabaseConfig, PoolConfig};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// Shared r2d2 pool of Diesel `PostgreSQL` connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database` sized by `pool`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial idle connections cannot be
/// established within the connection timeout.
pub fn build_pool(database: &DatabaseConfig, pool: &PoolConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database.database_url());
    let built = Pool::builder()
        .max_size(pool.max_size)
        .min_idle(Some(pool.min_idle))
        .max_lifetime(Some(pool.max_lifetime))
        .idle_timeout(Some(pool.idle_timeout))
        .connection_timeout(pool.connection_timeout)
        .build(manager)?;

    tracing::info!(
        host = %database.host,
        port = database.port,
        database = %database.name,
        max_size = pool.max_size,
        "database pool ready"
    );
    Ok(built)
}
