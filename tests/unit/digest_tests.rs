//! Unit tests for daily and weekly digest formatting.

use chrono::{Duration, Local, TimeZone, Utc};
use tasker::models::task::{Bucket, BucketCounts, NewTask, Task};
use tasker::report::digest::{daily_checkin, followup_questions, weekly_review, DigestData};

fn sample(title: &str, bucket: Bucket) -> Task {
    Task::new(NewTask {
        title: title.to_owned(),
        bucket: Some(bucket),
        ..NewTask::default()
    })
}

fn empty_data<'a>(counts: BucketCounts) -> DigestData<'a> {
    DigestData {
        today_plan: &[],
        stale_tasks: &[],
        counts,
        inbox_tasks: &[],
    }
}

#[test]
fn daily_checkin_greets_and_sections_plan() {
    let plan = vec![
        sample("Fix login bug", Bucket::Doing),
        sample("Draft proposal", Bucket::Next),
    ];
    let inbox = vec![sample("Read RFC", Bucket::Inbox)];
    let data = DigestData {
        today_plan: &plan,
        stale_tasks: &[],
        counts: BucketCounts::default(),
        inbox_tasks: &inbox,
    };

    let text = daily_checkin(&data, Utc::now());
    assert!(text.starts_with("Good morning! Here's your daily check-in:"));
    assert!(text.contains("DOING (1):"));
    assert!(text.contains("NEXT UP (1):"));
    assert!(text.contains("Inbox needs triage (1 items)"));
    assert!(text.contains("Followup:"));
}

#[test]
fn daily_checkin_with_empty_plan_prompts_planning() {
    let text = daily_checkin(&empty_data(BucketCounts::default()), Utc::now());
    assert!(text.contains("No tasks in Doing or Next. Time to plan your day!"));
    assert!(!text.contains("Followup:"));
}

#[test]
fn daily_checkin_lists_stale_tasks_with_elapsed_days() {
    let mut stale = sample("Dusty chore", Bucket::Next);
    let now = Utc::now();
    stale.updated_at = now - Duration::days(9);
    let stale_tasks = vec![stale];

    let data = DigestData {
        today_plan: &[],
        stale_tasks: &stale_tasks,
        counts: BucketCounts::default(),
        inbox_tasks: &[],
    };

    let text = daily_checkin(&data, now);
    assert!(text.contains("Stale tasks (1):"));
    assert!(text.contains("[9d ago]"));
}

#[test]
fn followups_distinguish_long_untouched_tasks() {
    let now = Utc::now();
    let mut old = sample("Long runner", Bucket::Doing);
    old.updated_at = now - Duration::days(4);
    let fresh = sample("Fresh start", Bucket::Doing);

    let text = followup_questions(&[&old, &fresh], now);
    assert!(text.contains("\"Long runner\" - still working on this? (4d)"));
    assert!(text.contains("\"Fresh start\" - any blockers?"));
}

#[test]
fn followups_cap_at_five() {
    let now = Utc::now();
    let tasks: Vec<Task> = (0..8)
        .map(|i| sample(&format!("doing-{i}"), Bucket::Doing))
        .collect();
    let refs: Vec<&Task> = tasks.iter().collect();

    let text = followup_questions(&refs, now);
    assert_eq!(text.matches('\u{2022}').count(), 5);
}

#[test]
fn weekly_review_headers_with_week_of_monday() {
    let now = Local.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).single().unwrap();
    let text = weekly_review(&empty_data(BucketCounts::default()), &[], now);
    assert!(text.starts_with("Weekly Review - Week of Mar 11"));
    assert!(text.contains("No tasks completed this week."));
}

#[test]
fn weekly_review_truncates_completed_list_at_ten() {
    let completed: Vec<Task> = (0..13)
        .map(|i| sample(&format!("done-{i}"), Bucket::Done))
        .collect();

    let text = weekly_review(
        &empty_data(BucketCounts::default()),
        &completed,
        Local::now(),
    );
    assert!(text.contains("Completed this week (13):"));
    assert!(text.contains("... and 3 more"));
}

#[test]
fn weekly_review_reports_counts_and_focus() {
    let plan = vec![
        sample("A", Bucket::Doing),
        sample("B", Bucket::Doing),
        sample("C", Bucket::Next),
        sample("D", Bucket::Next),
    ];
    let counts = BucketCounts {
        inbox: 3,
        next: 2,
        doing: 2,
        done: 11,
    };
    let data = DigestData {
        today_plan: &plan,
        stale_tasks: &[],
        counts,
        inbox_tasks: &[],
    };

    let text = weekly_review(&data, &[], Local::now());
    assert!(text.contains("  Inbox: 3 | Next: 2 | Doing: 2 | Done: 11"));
    assert!(text.contains("Focus for next week:"));
    // Three focus entries at most, doing before next.
    let focus_section = text.split("Focus for next week:").nth(1).unwrap();
    assert_eq!(focus_section.matches('\u{2022}').count(), 3);
    assert!(focus_section.contains("A"));
    assert!(focus_section.contains("C"));
    assert!(!focus_section.contains("D"));
}
