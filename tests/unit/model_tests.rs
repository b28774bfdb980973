//! Unit tests for domain model types.

use tasker::models::event::TaskEventKind;
use tasker::models::outbox::OutboxKind;
use tasker::models::task::{Bucket, NewTask, Priority, Task, TaskPatch};

#[test]
fn bucket_round_trips_through_storage_repr() {
    for bucket in Bucket::ALL {
        assert_eq!(Bucket::parse(bucket.as_str()), Some(bucket));
    }
    assert_eq!(Bucket::parse("archive"), None);
}

#[test]
fn bucket_defaults_to_inbox() {
    assert_eq!(Bucket::default(), Bucket::Inbox);
}

#[test]
fn priority_orders_p1_first() {
    assert!(Priority::P1 < Priority::P2);
    assert!(Priority::P2 < Priority::P3);
    assert_eq!(Priority::parse("p2"), Some(Priority::P2));
    assert_eq!(Priority::parse("high"), None);
}

#[test]
fn event_kind_round_trips() {
    for kind in [
        TaskEventKind::Created,
        TaskEventKind::Updated,
        TaskEventKind::Moved,
        TaskEventKind::Completed,
        TaskEventKind::Blocked,
        TaskEventKind::Unblocked,
    ] {
        assert_eq!(TaskEventKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(TaskEventKind::parse("deleted"), None);
}

#[test]
fn outbox_kind_round_trips() {
    assert_eq!(OutboxKind::parse("daily_checkin"), Some(OutboxKind::DailyCheckin));
    assert_eq!(OutboxKind::parse("weekly_review"), Some(OutboxKind::WeeklyReview));
    assert_eq!(OutboxKind::parse("monthly"), None);
}

#[test]
fn new_task_defaults_to_inbox_and_unblocked() {
    let task = Task::new(NewTask {
        title: "Write spec".to_owned(),
        ..NewTask::default()
    });

    assert_eq!(task.bucket, Bucket::Inbox);
    assert!(task.blocked_reason.is_none());
    assert!(!task.id.is_empty());
    assert_eq!(task.created_at, task.updated_at);
}

#[test]
fn new_task_honors_explicit_bucket() {
    let task = Task::new(NewTask {
        title: "Full task".to_owned(),
        bucket: Some(Bucket::Next),
        notes_md: Some("Some notes".to_owned()),
        project: Some("test-project".to_owned()),
        estimate_minutes: Some(30),
        priority_hint: Some(Priority::P2),
    });

    assert_eq!(task.bucket, Bucket::Next);
    assert_eq!(task.notes_md.as_deref(), Some("Some notes"));
    assert_eq!(task.project.as_deref(), Some("test-project"));
    assert_eq!(task.estimate_minutes, Some(30));
    assert_eq!(task.priority_hint, Some(Priority::P2));
}

#[test]
fn empty_patch_is_detected() {
    assert!(TaskPatch::default().is_empty());
    let patch = TaskPatch {
        title: Some("x".to_owned()),
        ..TaskPatch::default()
    };
    assert!(!patch.is_empty());
}

#[test]
fn serde_uses_snake_case_enum_values() {
    let json = serde_json::to_string(&Bucket::Doing).expect("serialize");
    assert_eq!(json, "\"doing\"");
    let parsed: Priority = serde_json::from_str("\"p1\"").expect("deserialize");
    assert_eq!(parsed, Priority::P1);
}
