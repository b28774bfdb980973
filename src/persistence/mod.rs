//! Persistence layer modules.

pub mod checkin_repo;
pub mod db;
pub mod outbox_repo;
pub mod schema;
pub mod task_repo;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;
