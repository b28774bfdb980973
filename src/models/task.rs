//! Task model — the central entity of the tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle stage of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Captured but not yet triaged.
    #[default]
    Inbox,
    /// Triaged and queued up.
    Next,
    /// Actively being worked on.
    Doing,
    /// Finished.
    Done,
}

impl Bucket {
    /// All bucket values in display order.
    pub const ALL: [Self; 4] = [Self::Inbox, Self::Next, Self::Doing, Self::Done];

    /// Stable storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Next => "next",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Parse the storage representation.
    ///
    /// Returns `None` for any string outside the four enumerated values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inbox" => Some(Self::Inbox),
            "next" => Some(Self::Next),
            "doing" => Some(Self::Doing),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Priority hint; `P1` is the highest, lower enum order sorts first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Highest priority.
    P1,
    /// Medium priority.
    P2,
    /// Lowest priority.
    P3,
}

impl Priority {
    /// Stable storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P1 => "p1",
            Self::P2 => "p2",
            Self::P3 => "p3",
        }
    }

    /// Parse the storage representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Self::P1),
            "p2" => Some(Self::P2),
            "p3" => Some(Self::P3),
            _ => None,
        }
    }
}

/// Per-bucket task counts with every bucket present, zero-defaulted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub struct BucketCounts {
    /// Tasks in the inbox bucket.
    pub inbox: i64,
    /// Tasks in the next bucket.
    pub next: i64,
    /// Tasks in the doing bucket.
    pub doing: i64,
    /// Tasks in the done bucket.
    pub done: i64,
}

/// A tracked task.
///
/// Never physically deleted; completion moves it to the `done` bucket.
/// A non-null `blocked_reason` means the task is blocked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    /// Unique record identifier, assigned at creation.
    pub id: String,
    /// Short human-readable title. Always non-empty.
    pub title: String,
    /// Current lifecycle bucket.
    pub bucket: Bucket,
    /// Free-text notes in markdown.
    pub notes_md: Option<String>,
    /// Project label for grouping.
    pub project: Option<String>,
    /// Time estimate in minutes.
    pub estimate_minutes: Option<i64>,
    /// Priority hint.
    pub priority_hint: Option<Priority>,
    /// Why the task is blocked; `None` means not blocked.
    pub blocked_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp, bumped on every mutating operation.
    pub updated_at: DateTime<Utc>,
}

/// Input for task creation. Bucket defaults to inbox when unspecified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub struct NewTask {
    /// Required non-empty title.
    pub title: String,
    /// Target bucket; inbox when `None`.
    pub bucket: Option<Bucket>,
    /// Free-text notes.
    pub notes_md: Option<String>,
    /// Project label.
    pub project: Option<String>,
    /// Time estimate in minutes.
    pub estimate_minutes: Option<i64>,
    /// Priority hint.
    pub priority_hint: Option<Priority>,
}

/// Partial update. Absent fields are left untouched, not set to null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub struct TaskPatch {
    /// New title, when present.
    pub title: Option<String>,
    /// New notes, when present.
    pub notes_md: Option<String>,
    /// New project label, when present.
    pub project: Option<String>,
    /// New estimate, when present.
    pub estimate_minutes: Option<i64>,
    /// New priority hint, when present.
    pub priority_hint: Option<Priority>,
}

impl TaskPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes_md.is_none()
            && self.project.is_none()
            && self.estimate_minutes.is_none()
            && self.priority_hint.is_none()
    }
}

/// Listing filter. Blocked tasks are excluded unless `include_blocked`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Bucket equality filter.
    pub bucket: Option<Bucket>,
    /// Project equality filter.
    pub project: Option<String>,
    /// Include tasks with a non-null blocked reason.
    pub include_blocked: bool,
    /// Result-count cap; `None` returns all matches.
    pub limit: Option<i64>,
}

impl TaskFilter {
    /// Filter restricted to one bucket, otherwise defaults.
    #[must_use]
    pub fn bucket(bucket: Bucket) -> Self {
        Self {
            bucket: Some(bucket),
            ..Self::default()
        }
    }
}

impl Task {
    /// Construct a new task from creation input.
    ///
    /// Generates the identifier and sets both timestamps to now.
    #[must_use]
    pub fn new(input: NewTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            bucket: input.bucket.unwrap_or_default(),
            notes_md: input.notes_md,
            project: input.project,
            estimate_minutes: input.estimate_minutes,
            priority_hint: input.priority_hint,
            blocked_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}
