//! Unit tests for `CheckinRepo`.

use std::sync::Arc;

use tasker::config::GlobalConfig;
use tasker::models::task::{Bucket, NewTask};
use tasker::persistence::checkin_repo::CheckinRepo;
use tasker::persistence::db::{self, Database};
use tasker::persistence::task_repo::TaskRepo;

async fn setup(allow_mutations: bool) -> (Arc<Database>, Arc<GlobalConfig>) {
    let pool = Arc::new(db::connect_memory().await.expect("db"));
    let config = Arc::new(GlobalConfig::new("sqlite::memory:".to_owned(), allow_mutations));
    (pool, config)
}

#[tokio::test]
async fn create_snapshots_current_doing_ids() {
    let (pool, config) = setup(true).await;
    let tasks = TaskRepo::new(Arc::clone(&pool), Arc::clone(&config));
    let checkins = CheckinRepo::new(Arc::clone(&pool), Arc::clone(&config));

    let doing = tasks
        .create(NewTask {
            title: "In flight".to_owned(),
            bucket: Some(Bucket::Doing),
            ..NewTask::default()
        })
        .await
        .expect("create task");
    tasks
        .create(NewTask {
            title: "Inboxed".to_owned(),
            ..NewTask::default()
        })
        .await
        .expect("create task");

    let checkin = checkins.create("Morning status").await.expect("checkin");
    assert_eq!(checkin.summary, "Morning status");

    let snapshot = checkin.doing_snapshot.expect("snapshot");
    let ids: Vec<String> = serde_json::from_str(&snapshot).expect("snapshot json");
    assert_eq!(ids, vec![doing.id]);
}

#[tokio::test]
async fn create_with_empty_doing_stores_empty_snapshot() {
    let (pool, config) = setup(true).await;
    let checkins = CheckinRepo::new(pool, config);

    let checkin = checkins.create("Quiet day").await.expect("checkin");
    let snapshot = checkin.doing_snapshot.expect("snapshot");
    let ids: Vec<String> = serde_json::from_str(&snapshot).expect("snapshot json");
    assert!(ids.is_empty());
}

#[tokio::test]
async fn create_ignores_the_mutation_gate() {
    let (pool, config) = setup(false).await;
    let checkins = CheckinRepo::new(pool, config);

    // Check-ins write even when task mutations are disabled.
    let checkin = checkins.create("Read-only day").await.expect("checkin");
    assert_eq!(checkin.summary, "Read-only day");
}

#[tokio::test]
async fn list_recent_returns_newest_first_and_honors_limit() {
    let (pool, config) = setup(true).await;
    let checkins = CheckinRepo::new(pool, config);

    for i in 0..3 {
        checkins
            .create(&format!("status-{i}"))
            .await
            .expect("checkin");
        // Timestamp resolution in the RFC3339 column is sub-second, but a
        // tiny pause keeps the ordering deterministic.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let recent = checkins.list_recent(2).await.expect("list");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].summary, "status-2");
    assert_eq!(recent[1].summary, "status-1");
}
