//! `tasks://` MCP resource handlers.
//!
//! Read-only views of the inbox, next, and doing buckets plus the
//! assembled today plan, returned as plain text without any mutation.

use std::sync::Arc;

use rmcp::model::{
    Annotated, ListResourcesResult, RawResource, ReadResourceRequestParam, ReadResourceResult,
    ResourceContents,
};
use tracing::info;

use crate::mcp::handler::AppState;
use crate::models::task::{Bucket, TaskFilter};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::{short_id, today_plan_view};
use crate::{AppError, Result};

/// A named read-only task view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskView {
    /// Untriaged tasks.
    Inbox,
    /// Queued-up tasks.
    Next,
    /// Tasks in progress.
    Doing,
    /// The assembled today plan.
    Today,
}

impl TaskView {
    /// All views in listing order.
    pub const ALL: [Self; 4] = [Self::Inbox, Self::Next, Self::Doing, Self::Today];

    /// Resource URI for this view.
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Inbox => "tasks://inbox",
            Self::Next => "tasks://next",
            Self::Doing => "tasks://doing",
            Self::Today => "tasks://today",
        }
    }

    /// Short resource name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Next => "next",
            Self::Doing => "doing",
            Self::Today => "today",
        }
    }

    /// One-line resource description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox tasks",
            Self::Next => "Next tasks",
            Self::Doing => "Doing tasks",
            Self::Today => "Today plan",
        }
    }
}

/// Parse a `tasks://` URI into its view.
///
/// Returns `None` for any URI outside the four known views.
#[must_use]
pub fn parse_task_uri(uri: &str) -> Option<TaskView> {
    TaskView::ALL.into_iter().find(|view| view.uri() == uri)
}

/// Build the `ListResourcesResult` exposing all four task views.
#[must_use]
pub fn list_resources() -> ListResourcesResult {
    let resources = TaskView::ALL
        .into_iter()
        .map(|view| {
            Annotated::new(
                RawResource {
                    uri: view.uri().into(),
                    name: view.name().into(),
                    description: Some(view.description().into()),
                    mime_type: Some("text/plain".into()),
                    size: None,
                    title: None,
                    icons: None,
                    meta: None,
                },
                None,
            )
        })
        .collect();

    ListResourcesResult {
        resources,
        next_cursor: None,
        meta: None,
    }
}

/// Handle `resources/read` for a task view.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown URI and `AppError::Db`
/// when a query fails.
pub async fn read_resource(
    request: &ReadResourceRequestParam,
    state: &Arc<AppState>,
) -> Result<ReadResourceResult> {
    let view = parse_task_uri(&request.uri)
        .ok_or_else(|| AppError::NotFound(format!("unknown resource: {}", request.uri)))?;

    info!(uri = %request.uri, "reading task view resource");

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));

    let text = match view {
        TaskView::Inbox => bucket_listing(&repo, Bucket::Inbox).await?,
        TaskView::Next => bucket_listing(&repo, Bucket::Next).await?,
        TaskView::Doing => bucket_listing(&repo, Bucket::Doing).await?,
        TaskView::Today => {
            let tasks = repo.today_plan().await?;
            if tasks.is_empty() {
                "No tasks in today plan. Move tasks to Doing or Next to start.".to_owned()
            } else {
                today_plan_view(&tasks)
            }
        }
    };

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(text, request.uri.clone())],
    })
}

async fn bucket_listing(repo: &TaskRepo, bucket: Bucket) -> Result<String> {
    let tasks = repo.list(&TaskFilter::bucket(bucket)).await?;
    if tasks.is_empty() {
        return Ok(format!("No tasks in {}.", bucket.as_str()));
    }

    Ok(tasks
        .iter()
        .map(|t| format!("- [{}] {}", short_id(&t.id), t.title))
        .collect::<Vec<_>>()
        .join("\n"))
}
