//! `SQLite` connection pool construction and shutdown.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::{AppError, Result};

use super::schema;

/// Alias for the shared `SQLite` pool.
pub type Database = SqlitePool;

/// Connect to `SQLite` at `url`, creating the database file when missing,
/// and apply the schema.
///
/// The pool is constructed once at process startup and shared via `Arc`;
/// concurrency beyond that is delegated to `SQLite`'s own
/// autocommit-per-statement semantics.
///
/// # Errors
///
/// Returns `AppError::Db` if the connection or schema application fails.
pub async fn connect(url: &str) -> Result<Database> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|err| AppError::Db(format!("invalid database url: {err}")))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    schema::bootstrap_schema(&pool).await?;
    Ok(pool)
}

/// Connect to a fresh in-memory `SQLite` database with schema applied.
///
/// Pinned to a single connection so the whole pool sees one database.
/// Used by tests.
///
/// # Errors
///
/// Returns `AppError::Db` if the connection or schema application fails.
pub async fn connect_memory() -> Result<Database> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|err| AppError::Db(format!("invalid memory url: {err}")))?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    schema::bootstrap_schema(&pool).await?;
    Ok(pool)
}

/// Close the pool, releasing all connections.
pub async fn close(pool: &Database) {
    pool.close().await;
}
