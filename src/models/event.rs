//! Append-only audit records for task mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of mutation that produced an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    /// Task was created.
    Created,
    /// Task fields were patched.
    Updated,
    /// Task changed bucket.
    Moved,
    /// Task was marked done.
    Completed,
    /// Task was blocked with a reason.
    Blocked,
    /// Task block was cleared.
    Unblocked,
}

impl TaskEventKind {
    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Moved => "moved",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
            Self::Unblocked => "unblocked",
        }
    }

    /// Parse the storage representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "moved" => Some(Self::Moved),
            "completed" => Some(Self::Completed),
            "blocked" => Some(Self::Blocked),
            "unblocked" => Some(Self::Unblocked),
            _ => None,
        }
    }
}

/// One audit row per mutating operation on a task.
///
/// Never updated or deleted. The payload is an opaque serialized snapshot
/// of the triggering input; its consumers are external and undefined, so
/// it carries no schema here. Events are a history log only — never used
/// to reconstruct authoritative task state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TaskEvent {
    /// Unique record identifier.
    pub id: String,
    /// Identifier of the owning task (weak reference).
    pub task_id: String,
    /// Mutation kind.
    pub kind: TaskEventKind,
    /// Opaque serialized snapshot of the triggering input.
    pub payload: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskEvent {
    /// Construct a new event for a task mutation.
    #[must_use]
    pub fn new(task_id: String, kind: TaskEventKind, payload: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            task_id,
            kind,
            payload,
            created_at: Utc::now(),
        }
    }
}
