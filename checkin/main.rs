#![forbid(unsafe_code)]

//! `tasker-checkin` — digest generation script.
//!
//! Invoked out-of-band (e.g. by cron): assembles a daily check-in or
//! weekly review from the store and writes it to the outbox for later
//! delivery. `--dry-run` prints the digest without persisting anything.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Local, Utc};
use clap::Parser;

use tasker::config::GlobalConfig;
use tasker::models::outbox::OutboxKind;
use tasker::models::task::{Bucket, TaskFilter};
use tasker::persistence::db;
use tasker::persistence::outbox_repo::OutboxRepo;
use tasker::persistence::task_repo::TaskRepo;
use tasker::report::digest::{daily_checkin, weekly_review, DigestData};
use tasker::Result;

/// Staleness threshold used by both digests.
const STALE_DAYS: i64 = 7;

#[derive(Debug, Parser)]
#[command(
    name = "tasker-checkin",
    about = "Generate a daily or weekly task digest into the outbox",
    version,
    long_about = None
)]
struct Cli {
    /// Produce the weekly review instead of the daily check-in.
    #[arg(long)]
    weekly: bool,

    /// Print the digest without writing an outbox row.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("Check-in failed: failed to build tokio runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Check-in failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Cli) -> Result<()> {
    let config = Arc::new(GlobalConfig::from_env()?);
    let pool = Arc::new(db::connect(&config.database_url).await?);

    let result = generate(args, &pool, &config).await;

    db::close(&pool).await;
    result
}

async fn generate(args: &Cli, pool: &Arc<db::Database>, config: &Arc<GlobalConfig>) -> Result<()> {
    let tasks = TaskRepo::new(Arc::clone(pool), Arc::clone(config));

    let today_plan = tasks.today_plan().await?;
    let stale_tasks = tasks.stale(STALE_DAYS).await?;
    let counts = tasks.counts().await?;
    let inbox_tasks = tasks.list(&TaskFilter::bucket(Bucket::Inbox)).await?;

    let data = DigestData {
        today_plan: &today_plan,
        stale_tasks: &stale_tasks,
        counts,
        inbox_tasks: &inbox_tasks,
    };

    let (kind, message) = if args.weekly {
        let completed = tasks.completed_this_week().await?;
        (
            OutboxKind::WeeklyReview,
            weekly_review(&data, &completed, Local::now()),
        )
    } else {
        (OutboxKind::DailyCheckin, daily_checkin(&data, Utc::now()))
    };

    if args.dry_run {
        println!("[DRY RUN] Would create outbox message:\n");
        println!("{message}");
        return Ok(());
    }

    let outbox = OutboxRepo::new(Arc::clone(pool), Arc::clone(config));
    let stored = outbox.create(kind, &message).await?;

    println!("Created {} message: {}", kind.as_str(), stored.id);
    println!("\n{message}");

    Ok(())
}
