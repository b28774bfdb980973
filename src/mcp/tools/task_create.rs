//! `task_create` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;
use tracing::{info, info_span, Instrument};

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::models::task::{Bucket, NewTask, Priority};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::task_summary;

/// Input parameters for `task_create`.
#[derive(Debug, serde::Deserialize)]
struct CreateInput {
    /// Required non-empty title.
    title: String,
    /// Target bucket; defaults to inbox.
    bucket: Option<Bucket>,
    /// Additional notes in markdown.
    notes_md: Option<String>,
    /// Project name.
    project: Option<String>,
    /// Time estimate in minutes; must be positive.
    estimate_minutes: Option<i64>,
    /// Priority hint.
    priority_hint: Option<Priority>,
}

/// Handle the `task_create` tool call.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: CreateInput = parse_args(args, "task_create")?;

    if input.title.trim().is_empty() {
        return Err(rmcp::ErrorData::invalid_params(
            "title must not be empty",
            None,
        ));
    }
    if matches!(input.estimate_minutes, Some(est) if est <= 0) {
        return Err(rmcp::ErrorData::invalid_params(
            "estimate_minutes must be positive",
            None,
        ));
    }

    let span = info_span!("task_create", bucket = ?input.bucket);

    async move {
        let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
        let task = repo
            .create(NewTask {
                title: input.title,
                bucket: input.bucket,
                notes_md: input.notes_md,
                project: input.project,
                estimate_minutes: input.estimate_minutes,
                priority_hint: input.priority_hint,
            })
            .await
            .map_err(map_app_error)?;

        info!(task_id = %task.id, bucket = task.bucket.as_str(), "task created");
        Ok(text_result(format!("Created: {}", task_summary(&task))))
    }
    .instrument(span)
    .await
}
