//! Outbox repository — pending digest deliveries.
//!
//! Rows transition from pending to delivered exactly once and are never
//! deleted; delivery itself is performed by an external consumer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::GlobalConfig;
use crate::models::outbox::{OutboxKind, OutboxMessage};
use crate::{AppError, Result};

use super::db::Database;

/// Repository wrapper around `SQLite` for outbox records.
#[derive(Clone)]
pub struct OutboxRepo {
    db: Arc<Database>,
    config: Arc<GlobalConfig>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct OutboxRow {
    id: String,
    kind: String,
    content: String,
    created_at: String,
    delivered_at: Option<String>,
}

impl OutboxRow {
    /// Convert a database row into the domain model.
    fn into_message(self) -> Result<OutboxMessage> {
        let kind = OutboxKind::parse(&self.kind)
            .ok_or_else(|| AppError::Db(format!("invalid outbox kind: {}", self.kind)))?;
        let created_at = parse_timestamp(&self.created_at, "created_at")?;
        let delivered_at = self
            .delivered_at
            .as_deref()
            .map(|s| parse_timestamp(s, "delivered_at"))
            .transpose()?;

        Ok(OutboxMessage {
            id: self.id,
            kind,
            content: self.content,
            created_at,
            delivered_at,
        })
    }
}

fn parse_timestamp(s: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| AppError::Db(format!("invalid {field}: {err}")))
}

impl OutboxRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>, config: Arc<GlobalConfig>) -> Self {
        Self { db, config }
    }

    fn ensure_mutations_allowed(&self) -> Result<()> {
        if self.config.allow_mutations {
            Ok(())
        } else {
            Err(AppError::MutationsDisabled)
        }
    }

    /// Insert a new pending message holding a rendered digest.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MutationsDisabled` when the gate is off or
    /// `AppError::Db` on storage failure.
    pub async fn create(&self, kind: OutboxKind, content: &str) -> Result<OutboxMessage> {
        self.ensure_mutations_allowed()?;

        let message = OutboxMessage::new(kind, content.to_owned());

        sqlx::query(
            "INSERT INTO outbox (id, kind, content, created_at, delivered_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&message.id)
        .bind(message.kind.as_str())
        .bind(&message.content)
        .bind(message.created_at.to_rfc3339())
        .bind(message.delivered_at.map(|dt| dt.to_rfc3339()))
        .execute(self.db.as_ref())
        .await?;

        Ok(message)
    }

    /// All undelivered messages, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_pending(&self) -> Result<Vec<OutboxMessage>> {
        let rows: Vec<OutboxRow> = sqlx::query_as(
            "SELECT * FROM outbox WHERE delivered_at IS NULL ORDER BY created_at ASC",
        )
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(OutboxRow::into_message).collect()
    }

    /// Stamp a message delivered, removing it from the pending set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when `id` has no matching row,
    /// `AppError::MutationsDisabled` when the gate is off, or
    /// `AppError::Db` on storage failure.
    pub async fn mark_delivered(&self, id: &str) -> Result<OutboxMessage> {
        self.ensure_mutations_allowed()?;

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query("UPDATE outbox SET delivered_at = ?1 WHERE id = ?2")
            .bind(&now)
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("outbox message {id} not found")));
        }

        let row: Option<OutboxRow> = sqlx::query_as("SELECT * FROM outbox WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;

        row.map(OutboxRow::into_message)
            .transpose()?
            .ok_or_else(|| AppError::NotFound(format!("outbox message {id} not found")))
    }
}
