/// Forkful - Database connection pool setup.
///
/// Uses diesel-async with deadpool for async PostgreSQL connection pooling.
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use secrecy::ExposeSecret;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Database connection pool type (async, no background threads).
pub type DbPool = Pool<AsyncPgConnection>;

/// Database connection type (pooled async connection).
pub type DbConnection = Object<AsyncPgConnection>;

/// Create a new database connection pool.
///
/// Connections are established lazily on first checkout.
pub fn create_pool(config: &Config) -> AppResult<DbPool> {
    let manager =
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database.url.expose_secret());

    let pool = Pool::builder(manager)
        .max_size(config.database.max_connections as usize)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to create database pool: {}", e)))?;

    tracing::info!(
        "Database pool created with max {} connections",
        config.database.max_connections
    );

    Ok(pool)
}

/// Get a connection from the pool.
pub async fn get_connection(pool: &DbPool) -> AppResult<DbConnection> {
    pool.get().await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to get database connection: {}", e))
    })
}

/// Escape LIKE/ILIKE wildcard characters in a search pattern.
///
/// PostgreSQL LIKE treats `%` and `_` as wildcards. If user input is passed
/// directly into a LIKE pattern, these characters allow unintended pattern
/// matching. This function escapes them so they are treated as literals.
///
/// The backslash `\` is also escaped since it is the default LIKE escape
/// character.
pub fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Build a LIKE/ILIKE "contains" pattern from user input.
///
/// Returns `%<escaped_input>%` suitable for use with `.ilike()`.
pub fn like_contains(input: &str) -> String {
    format!("%{}%", escape_like_pattern(input))
}
