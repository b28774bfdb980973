//! Daily check-in and weekly review digest formatting.
//!
//! Pure transformations from already-fetched task collections to text.
//! Callers supply `now` so output is reproducible in tests.

use chrono::{DateTime, Local, Utc};

use crate::models::task::{Bucket, BucketCounts, Task};

use super::render::{days_ago, task_line, week_start};

/// Maximum stale tasks shown in a digest.
const STALE_SHOWN: usize = 5;

/// Maximum follow-up prompts appended to the daily check-in.
const FOLLOWUP_MAX: usize = 5;

/// Maximum completed tasks listed in the weekly review.
const COMPLETED_SHOWN: usize = 10;

/// Maximum focus tasks suggested in the weekly review.
const FOCUS_MAX: usize = 3;

/// A doing task untouched for longer than this gets the
/// "still working on this?" follow-up variant.
const FOLLOWUP_STALE_DAYS: i64 = 2;

/// Inputs shared by both digests, as fetched by the check-in script.
#[derive(Debug)]
pub struct DigestData<'a> {
    /// Today plan: doing tasks followed by next-up tasks.
    pub today_plan: &'a [Task],
    /// Stale tasks, oldest first.
    pub stale_tasks: &'a [Task],
    /// Per-bucket counts.
    pub counts: BucketCounts,
    /// Untriaged inbox tasks.
    pub inbox_tasks: &'a [Task],
}

fn split_plan(plan: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    let doing: Vec<&Task> = plan.iter().filter(|t| t.bucket == Bucket::Doing).collect();
    let next: Vec<&Task> = plan.iter().filter(|t| t.bucket == Bucket::Next).collect();
    (doing, next)
}

/// Heuristic follow-up prompts for doing tasks.
///
/// Tasks untouched for more than two days are asked about explicitly
/// with a day count; the rest get a generic blocker question. Returns
/// an empty string when there is nothing in doing.
#[must_use]
pub fn followup_questions(doing: &[&Task], now: DateTime<Utc>) -> String {
    if doing.is_empty() {
        return String::new();
    }

    let mut lines = vec![String::new(), "Followup:".to_owned()];
    for task in doing.iter().take(FOLLOWUP_MAX) {
        let days_in_doing = days_ago(task.updated_at, now);
        if days_in_doing > FOLLOWUP_STALE_DAYS {
            lines.push(format!(
                "• \"{}\" - still working on this? ({days_in_doing}d)",
                task.title
            ));
        } else {
            lines.push(format!("• \"{}\" - any blockers?", task.title));
        }
    }

    lines.join("\n")
}

fn push_stale_section(lines: &mut Vec<String>, stale: &[Task], header: &str, now: DateTime<Utc>) {
    if stale.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{header} ({}):", stale.len()));
    for task in stale.iter().take(STALE_SHOWN) {
        let days = days_ago(task.updated_at, now);
        lines.push(format!("• {} [{days}d ago]", task_line(task)));
    }
}

/// Render the daily check-in digest.
#[must_use]
pub fn daily_checkin(data: &DigestData<'_>, now: DateTime<Utc>) -> String {
    let mut lines = vec!["Good morning! Here's your daily check-in:".to_owned()];

    let (doing, next) = split_plan(data.today_plan);

    if !doing.is_empty() {
        lines.push(String::new());
        lines.push(format!("DOING ({}):", doing.len()));
        for task in &doing {
            lines.push(format!("• {}", task_line(task)));
        }
    }

    if !next.is_empty() {
        lines.push(String::new());
        lines.push(format!("NEXT UP ({}):", next.len()));
        for task in &next {
            lines.push(format!("• {}", task_line(task)));
        }
    }

    if doing.is_empty() && next.is_empty() {
        lines.push(String::new());
        lines.push("No tasks in Doing or Next. Time to plan your day!".to_owned());
    }

    if !data.inbox_tasks.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Inbox needs triage ({} items)",
            data.inbox_tasks.len()
        ));
    }

    push_stale_section(&mut lines, data.stale_tasks, "Stale tasks", now);

    let followup = followup_questions(&doing, now);
    if !followup.is_empty() {
        lines.push(followup);
    }

    lines.join("\n")
}

/// Render the weekly review digest.
///
/// `now` fixes both the week-of header date (Monday of the current
/// local week) and the elapsed-day math.
#[must_use]
pub fn weekly_review(
    data: &DigestData<'_>,
    completed_this_week: &[Task],
    now: DateTime<Local>,
) -> String {
    let monday = week_start(now);
    let mut lines = vec![format!("Weekly Review - Week of {}", monday.format("%b %-d"))];

    if completed_this_week.is_empty() {
        lines.push(String::new());
        lines.push("No tasks completed this week.".to_owned());
    } else {
        lines.push(String::new());
        lines.push(format!(
            "Completed this week ({}):",
            completed_this_week.len()
        ));
        for task in completed_this_week.iter().take(COMPLETED_SHOWN) {
            let day = task.updated_at.with_timezone(&now.timezone()).format("%a");
            lines.push(format!("• {} ({day})", task.title));
        }
        if completed_this_week.len() > COMPLETED_SHOWN {
            lines.push(format!(
                "• ... and {} more",
                completed_this_week.len() - COMPLETED_SHOWN
            ));
        }
    }

    lines.push(String::new());
    lines.push("Current state:".to_owned());
    lines.push(format!(
        "  Inbox: {} | Next: {} | Doing: {} | Done: {}",
        data.counts.inbox, data.counts.next, data.counts.doing, data.counts.done
    ));

    push_stale_section(
        &mut lines,
        data.stale_tasks,
        "Stale tasks needing attention",
        now.with_timezone(&Utc),
    );

    let (doing, next) = split_plan(data.today_plan);
    let focus: Vec<&Task> = doing.into_iter().chain(next).take(FOCUS_MAX).collect();
    if !focus.is_empty() {
        lines.push(String::new());
        lines.push("Focus for next week:".to_owned());
        for task in &focus {
            lines.push(format!("• {}", task_line(task)));
        }
    }

    lines.join("\n")
}
