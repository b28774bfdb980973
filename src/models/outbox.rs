//! Pending delivery records for generated digests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of digest held by an outbox message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutboxKind {
    /// Daily check-in digest.
    DailyCheckin,
    /// Weekly review digest.
    WeeklyReview,
}

impl OutboxKind {
    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyCheckin => "daily_checkin",
            Self::WeeklyReview => "weekly_review",
        }
    }

    /// Parse the storage representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily_checkin" => Some(Self::DailyCheckin),
            "weekly_review" => Some(Self::WeeklyReview),
            _ => None,
        }
    }
}

/// A digest awaiting delivery by an external consumer.
///
/// `delivered_at` is null until the consumer marks it delivered; the
/// transition happens exactly once and the row is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct OutboxMessage {
    /// Unique record identifier.
    pub id: String,
    /// Digest kind.
    pub kind: OutboxKind,
    /// Full rendered digest text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Delivery timestamp; `None` while pending.
    pub delivered_at: Option<DateTime<Utc>>,
}

impl OutboxMessage {
    /// Construct a new pending outbox message.
    #[must_use]
    pub fn new(kind: OutboxKind, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content,
            created_at: Utc::now(),
            delivered_at: None,
        }
    }
}
