//! Unit tests for `OutboxRepo`.

use std::sync::Arc;

use tasker::config::GlobalConfig;
use tasker::models::outbox::OutboxKind;
use tasker::persistence::db::{self, Database};
use tasker::persistence::outbox_repo::OutboxRepo;
use tasker::AppError;

async fn setup(allow_mutations: bool) -> (Arc<Database>, OutboxRepo) {
    let pool = Arc::new(db::connect_memory().await.expect("db"));
    let config = Arc::new(GlobalConfig::new("sqlite::memory:".to_owned(), allow_mutations));
    let repo = OutboxRepo::new(Arc::clone(&pool), config);
    (pool, repo)
}

#[tokio::test]
async fn create_starts_pending() {
    let (_pool, repo) = setup(true).await;

    let message = repo
        .create(OutboxKind::DailyCheckin, "Good morning!")
        .await
        .expect("create");
    assert_eq!(message.kind, OutboxKind::DailyCheckin);
    assert_eq!(message.content, "Good morning!");
    assert!(message.delivered_at.is_none());

    let pending = repo.list_pending().await.expect("pending");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, message.id);
}

#[tokio::test]
async fn list_pending_is_oldest_first() {
    let (_pool, repo) = setup(true).await;

    let first = repo
        .create(OutboxKind::DailyCheckin, "first")
        .await
        .expect("create");
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = repo
        .create(OutboxKind::WeeklyReview, "second")
        .await
        .expect("create");

    let pending = repo.list_pending().await.expect("pending");
    let ids: Vec<&str> = pending.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
}

#[tokio::test]
async fn mark_delivered_removes_from_pending() {
    let (_pool, repo) = setup(true).await;

    let message = repo
        .create(OutboxKind::WeeklyReview, "review text")
        .await
        .expect("create");

    let delivered = repo.mark_delivered(&message.id).await.expect("deliver");
    assert!(delivered.delivered_at.is_some());
    assert_eq!(delivered.content, "review text");

    let pending = repo.list_pending().await.expect("pending");
    assert!(pending.is_empty());
}

#[tokio::test]
async fn mark_delivered_missing_id_is_not_found() {
    let (_pool, repo) = setup(true).await;

    let result = repo.mark_delivered("missing").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn gate_disabled_blocks_outbox_writes() {
    let (_pool, repo) = setup(false).await;

    assert!(matches!(
        repo.create(OutboxKind::DailyCheckin, "nope").await,
        Err(AppError::MutationsDisabled)
    ));
    assert!(matches!(
        repo.mark_delivered("any").await,
        Err(AppError::MutationsDisabled)
    ));
}
