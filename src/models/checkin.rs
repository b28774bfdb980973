//! Point-in-time snapshots of in-progress work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A check-in record. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Checkin {
    /// Unique record identifier.
    pub id: String,
    /// Summary text supplied by the caller.
    pub summary: String,
    /// JSON array of the task identifiers in `doing` at creation time.
    pub doing_snapshot: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Checkin {
    /// Construct a new check-in with a serialized doing-task snapshot.
    #[must_use]
    pub fn new(summary: String, doing_snapshot: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            summary,
            doing_snapshot,
            created_at: Utc::now(),
        }
    }
}
