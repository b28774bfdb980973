//! Single-task renderings and date helpers shared by the tool layer and
//! the digest formatter.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};

use crate::models::task::{Bucket, Task};

/// First eight characters of a task identifier.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Compact one-line rendering used inside digests: short id, title,
/// estimate, and a blocked flag.
#[must_use]
pub fn task_line(task: &Task) -> String {
    let mut parts = vec![format!("[{}] {}", short_id(&task.id), task.title)];
    if let Some(estimate) = task.estimate_minutes {
        if estimate > 0 {
            parts.push(format!("~{estimate}m"));
        }
    }
    if task.blocked_reason.is_some() {
        parts.push("BLOCKED".to_owned());
    }
    parts.join(" ")
}

/// Tool-response rendering: short id, title, and conditional bucket,
/// priority, project, estimate, and blocked annotations.
#[must_use]
pub fn task_summary(task: &Task) -> String {
    let mut parts = vec![format!("[{}] {}", short_id(&task.id), task.title)];

    if task.bucket != Bucket::Inbox {
        parts.push(format!("({})", task.bucket.as_str()));
    }
    if let Some(priority) = task.priority_hint {
        parts.push(format!("[{}]", priority.as_str().to_uppercase()));
    }
    if let Some(ref project) = task.project {
        parts.push(format!("#{project}"));
    }
    if let Some(estimate) = task.estimate_minutes {
        if estimate > 0 {
            parts.push(format!("~{estimate}m"));
        }
    }
    if let Some(ref reason) = task.blocked_reason {
        parts.push(format!("BLOCKED: {reason}"));
    }

    parts.join(" ")
}

/// Full rendering with notes and timestamps, used by `task_get`.
#[must_use]
pub fn task_detail(task: &Task) -> String {
    let mut lines = vec![task_summary(task)];
    if let Some(ref notes) = task.notes_md {
        lines.push(String::new());
        lines.push("Notes:".to_owned());
        lines.push(notes.clone());
    }
    lines.push(String::new());
    lines.push(format!("Created: {}", task.created_at.to_rfc3339()));
    lines.push(format!("Updated: {}", task.updated_at.to_rfc3339()));
    lines.join("\n")
}

/// Sectioned DOING / NEXT UP rendering of the today plan, shared by the
/// `tasks_today` tool and the `tasks://today` resource. Callers handle
/// the empty case.
#[must_use]
pub fn today_plan_view(tasks: &[Task]) -> String {
    let doing: Vec<&Task> = tasks.iter().filter(|t| t.bucket == Bucket::Doing).collect();
    let next: Vec<&Task> = tasks.iter().filter(|t| t.bucket == Bucket::Next).collect();

    let mut lines: Vec<String> = Vec::new();

    if !doing.is_empty() {
        lines.push(format!("DOING ({})", doing.len()));
        lines.push(String::new());
        lines.extend(doing.iter().map(|t| task_summary(t)));
        lines.push(String::new());
    }

    if !next.is_empty() {
        lines.push(format!("NEXT UP ({})", next.len()));
        lines.push(String::new());
        lines.extend(next.iter().map(|t| task_summary(t)));
    }

    lines.join("\n")
}

/// Whole days elapsed between `then` and `now` — a floor of elapsed
/// time, not a calendar-day difference.
#[must_use]
pub fn days_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days()
}

/// Midnight of the most recent Monday at or before `now`, in `now`'s
/// timezone. Weeks start on Monday.
#[must_use]
pub fn week_start<Tz: TimeZone>(now: DateTime<Tz>) -> DateTime<Tz> {
    let offset = i64::from(now.weekday().num_days_from_monday());
    let monday = (now.date_naive() - Duration::days(offset)).and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&monday) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => dt,
        // Midnight skipped by a DST transition; keep the instant anyway.
        chrono::LocalResult::None => now.timezone().from_utc_datetime(&monday),
    }
}
