//! Check-in repository — immutable snapshots of in-progress work.

use std::sync::Arc;

use crate::config::GlobalConfig;
use crate::models::checkin::Checkin;
use crate::models::task::{Bucket, Task, TaskFilter};
use crate::persistence::task_repo::TaskRepo;
use crate::{AppError, Result};

use super::db::Database;

/// Repository wrapper around `SQLite` for check-in records.
#[derive(Clone)]
pub struct CheckinRepo {
    db: Arc<Database>,
    config: Arc<GlobalConfig>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct CheckinRow {
    id: String,
    summary: String,
    doing_snapshot: Option<String>,
    created_at: String,
}

impl CheckinRow {
    /// Convert a database row into the domain model.
    fn into_checkin(self) -> Result<Checkin> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|err| AppError::Db(format!("invalid created_at: {err}")))?;

        Ok(Checkin {
            id: self.id,
            summary: self.summary,
            doing_snapshot: self.doing_snapshot,
            created_at,
        })
    }
}

impl CheckinRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>, config: Arc<GlobalConfig>) -> Self {
        Self { db, config }
    }

    /// Create a check-in, snapshotting the identifiers of every task
    /// currently in `doing`.
    ///
    /// Deliberately not gated by the mutation flag, unlike every other
    /// write — inherited behavior, kept as specified.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` on storage failure.
    pub async fn create(&self, summary: &str) -> Result<Checkin> {
        let tasks = TaskRepo::new(Arc::clone(&self.db), Arc::clone(&self.config));
        let doing: Vec<Task> = tasks.list(&TaskFilter::bucket(Bucket::Doing)).await?;
        let doing_ids: Vec<&str> = doing.iter().map(|t| t.id.as_str()).collect();

        let snapshot = serde_json::to_string(&doing_ids)
            .map_err(|err| AppError::Db(format!("failed to serialize snapshot: {err}")))?;

        let checkin = Checkin::new(summary.to_owned(), Some(snapshot));

        sqlx::query(
            "INSERT INTO checkin (id, summary, doing_snapshot, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&checkin.id)
        .bind(&checkin.summary)
        .bind(&checkin.doing_snapshot)
        .bind(checkin.created_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;

        Ok(checkin)
    }

    /// Most recent check-ins, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Checkin>> {
        let rows: Vec<CheckinRow> =
            sqlx::query_as("SELECT * FROM checkin ORDER BY created_at DESC LIMIT ?1")
                .bind(limit)
                .fetch_all(self.db.as_ref())
                .await?;

        rows.into_iter().map(CheckinRow::into_checkin).collect()
    }
}
