//! Digest generation against a seeded store, written through the outbox.

use std::sync::Arc;

use chrono::{Duration, Local, Utc};
use tasker::config::GlobalConfig;
use tasker::models::outbox::OutboxKind;
use tasker::models::task::{Bucket, NewTask, TaskFilter};
use tasker::persistence::db::{self, Database};
use tasker::persistence::outbox_repo::OutboxRepo;
use tasker::persistence::task_repo::TaskRepo;
use tasker::report::digest::{daily_checkin, weekly_review, DigestData};

async fn seeded() -> (Arc<Database>, Arc<GlobalConfig>, TaskRepo) {
    let pool = Arc::new(db::connect_memory().await.expect("db"));
    let config = Arc::new(GlobalConfig::new("sqlite::memory:".to_owned(), true));
    let repo = TaskRepo::new(Arc::clone(&pool), Arc::clone(&config));

    repo.create(NewTask {
        title: "Fix login bug".to_owned(),
        bucket: Some(Bucket::Doing),
        ..NewTask::default()
    })
    .await
    .expect("create");
    repo.create(NewTask {
        title: "Draft proposal".to_owned(),
        bucket: Some(Bucket::Next),
        ..NewTask::default()
    })
    .await
    .expect("create");
    repo.create(NewTask {
        title: "Read RFC".to_owned(),
        ..NewTask::default()
    })
    .await
    .expect("create");

    (pool, config, repo)
}

#[tokio::test]
async fn daily_digest_reflects_store_state_and_lands_in_outbox() {
    let (pool, config, repo) = seeded().await;

    // Backdate the doing task so it earns the day-count follow-up.
    let doing = repo.today_plan().await.expect("plan");
    let past = (Utc::now() - Duration::days(4)).to_rfc3339();
    sqlx::query("UPDATE task SET updated_at = ?1 WHERE id = ?2")
        .bind(&past)
        .bind(&doing[0].id)
        .execute(pool.as_ref())
        .await
        .expect("backdate");

    let plan = repo.today_plan().await.expect("plan");
    let stale = repo.stale(7).await.expect("stale");
    let counts = repo.counts().await.expect("counts");
    let inbox = repo
        .list(&TaskFilter::bucket(Bucket::Inbox))
        .await
        .expect("inbox");

    let data = DigestData {
        today_plan: &plan,
        stale_tasks: &stale,
        counts,
        inbox_tasks: &inbox,
    };
    let message = daily_checkin(&data, Utc::now());

    assert!(message.starts_with("Good morning! Here's your daily check-in:"));
    assert!(message.contains("Fix login bug"));
    assert!(message.contains("Draft proposal"));
    assert!(message.contains("Inbox needs triage (1 items)"));
    assert!(message.contains("still working on this? (4d)"));

    let outbox = OutboxRepo::new(pool, config);
    let stored = outbox
        .create(OutboxKind::DailyCheckin, &message)
        .await
        .expect("outbox write");

    let pending = outbox.list_pending().await.expect("pending");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].content, message);

    outbox.mark_delivered(&stored.id).await.expect("deliver");
    assert!(outbox.list_pending().await.expect("pending").is_empty());
}

#[tokio::test]
async fn weekly_digest_reports_completions_and_counts() {
    let (pool, config, repo) = seeded().await;

    let shipped = repo
        .create(NewTask {
            title: "Ship release".to_owned(),
            bucket: Some(Bucket::Doing),
            ..NewTask::default()
        })
        .await
        .expect("create");
    repo.complete(&shipped.id).await.expect("complete");

    let plan = repo.today_plan().await.expect("plan");
    let stale = repo.stale(7).await.expect("stale");
    let counts = repo.counts().await.expect("counts");
    let completed = repo.completed_this_week().await.expect("completed");

    let data = DigestData {
        today_plan: &plan,
        stale_tasks: &stale,
        counts,
        inbox_tasks: &[],
    };
    let message = weekly_review(&data, &completed, Local::now());

    assert!(message.starts_with("Weekly Review - Week of "));
    assert!(message.contains("Completed this week (1):"));
    assert!(message.contains("Ship release"));
    assert!(message.contains("  Inbox: 1 | Next: 1 | Doing: 1 | Done: 1"));
    assert!(message.contains("Focus for next week:"));

    let outbox = OutboxRepo::new(pool, config);
    let stored = outbox
        .create(OutboxKind::WeeklyReview, &message)
        .await
        .expect("outbox write");
    assert_eq!(stored.kind, OutboxKind::WeeklyReview);
}
