//! Today-plan composition across the repository and its rendering.

use std::sync::Arc;

use tasker::config::GlobalConfig;
use tasker::models::task::{Bucket, NewTask, Priority};
use tasker::persistence::db;
use tasker::persistence::task_repo::TaskRepo;
use tasker::report::render::today_plan_view;

async fn repo() -> TaskRepo {
    let pool = Arc::new(db::connect_memory().await.expect("db"));
    let config = Arc::new(GlobalConfig::new("sqlite::memory:".to_owned(), true));
    TaskRepo::new(pool, config)
}

#[tokio::test]
async fn plan_takes_all_doing_then_top_next() {
    let repo = repo().await;

    for i in 0..2 {
        repo.create(NewTask {
            title: format!("doing-{i}"),
            bucket: Some(Bucket::Doing),
            ..NewTask::default()
        })
        .await
        .expect("create");
    }
    for i in 0..8 {
        repo.create(NewTask {
            title: format!("next-{i}"),
            bucket: Some(Bucket::Next),
            ..NewTask::default()
        })
        .await
        .expect("create");
    }

    let plan = repo.today_plan().await.expect("plan");
    assert_eq!(plan.len(), 7);
    assert_eq!(
        plan.iter().filter(|t| t.bucket == Bucket::Doing).count(),
        2
    );
    assert_eq!(plan.iter().filter(|t| t.bucket == Bucket::Next).count(), 5);
}

#[tokio::test]
async fn plan_respects_priority_within_next() {
    let repo = repo().await;

    repo.create(NewTask {
        title: "low".to_owned(),
        bucket: Some(Bucket::Next),
        priority_hint: Some(Priority::P3),
        ..NewTask::default()
    })
    .await
    .expect("create");
    let urgent = repo
        .create(NewTask {
            title: "urgent".to_owned(),
            bucket: Some(Bucket::Next),
            priority_hint: Some(Priority::P1),
            ..NewTask::default()
        })
        .await
        .expect("create");

    let plan = repo.today_plan().await.expect("plan");
    assert_eq!(plan[0].id, urgent.id);
}

#[tokio::test]
async fn plan_renders_into_sectioned_view() {
    let repo = repo().await;

    repo.create(NewTask {
        title: "Fix login bug".to_owned(),
        bucket: Some(Bucket::Doing),
        estimate_minutes: Some(45),
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

    let plan = repo.today_plan().await.expect("plan");
    let view = today_plan_view(&plan);

    assert!(view.contains("DOING (1)"));
    assert!(view.contains("Fix login bug"));
    assert!(view.contains("~45m"));
    assert!(view.contains("NEXT UP (1)"));
    assert!(view.contains("Draft proposal"));
}
