//! End-to-end task lifecycle: capture, move, complete, block.

use std::sync::Arc;

use tasker::config::GlobalConfig;
use tasker::models::event::TaskEventKind;
use tasker::models::task::{Bucket, NewTask, TaskFilter};
use tasker::persistence::db;
use tasker::persistence::task_repo::TaskRepo;

fn titled(title: &str) -> NewTask {
    NewTask {
        title: title.to_owned(),
        ..NewTask::default()
    }
}

#[tokio::test]
async fn capture_work_complete_lifecycle() {
    let pool = Arc::new(db::connect_memory().await.expect("db"));
    let config = Arc::new(GlobalConfig::new("sqlite::memory:".to_owned(), true));
    let repo = TaskRepo::new(pool, config);

    // Capture lands in the inbox.
    let task = repo.create(titled("Write spec")).await.expect("create");
    assert_eq!(task.bucket, Bucket::Inbox);

    // Pick it up.
    let task = repo.move_to(&task.id, Bucket::Doing).await.expect("move");
    assert_eq!(task.bucket, Bucket::Doing);

    // Ship it.
    let task = repo.complete(&task.id).await.expect("complete");
    assert_eq!(task.bucket, Bucket::Done);
    assert!(task.blocked_reason.is_none());

    // The audit trail records every step, newest first.
    let events = repo.events(&task.id).await.expect("events");
    let kinds: Vec<TaskEventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TaskEventKind::Completed,
            TaskEventKind::Moved,
            TaskEventKind::Created
        ]
    );
}

#[tokio::test]
async fn blocked_tasks_surface_only_on_request() {
    let pool = Arc::new(db::connect_memory().await.expect("db"));
    let config = Arc::new(GlobalConfig::new("sqlite::memory:".to_owned(), true));
    let repo = TaskRepo::new(pool, config);

    let task = repo
        .create(NewTask {
            title: "Send contract".to_owned(),
            bucket: Some(Bucket::Next),
            ..NewTask::default()
        })
        .await
        .expect("create");
    repo.block(&task.id, "waiting on review").await.expect("block");

    let filter = TaskFilter::bucket(Bucket::Next);
    let default_view = repo.list(&filter).await.expect("list");
    assert!(default_view.is_empty());

    let full_view = repo
        .list(&TaskFilter {
            include_blocked: true,
            ..TaskFilter::bucket(Bucket::Next)
        })
        .await
        .expect("list");
    assert_eq!(full_view.len(), 1);
    assert_eq!(
        full_view[0].blocked_reason.as_deref(),
        Some("waiting on review")
    );

    // Unblocking puts it back into the default view.
    repo.unblock(&task.id).await.expect("unblock");
    let default_view = repo.list(&filter).await.expect("list");
    assert_eq!(default_view.len(), 1);
}
