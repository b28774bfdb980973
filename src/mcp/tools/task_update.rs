//! `task_update` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;
use tracing::info;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::models::task::{Priority, TaskPatch};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::task_summary;

/// Input parameters for `task_update`. Absent fields are left untouched.
#[derive(Debug, serde::Deserialize)]
struct UpdateInput {
    /// Task identifier.
    id: String,
    /// New title.
    title: Option<String>,
    /// New notes.
    notes_md: Option<String>,
    /// New project.
    project: Option<String>,
    /// New time estimate; must be positive.
    estimate_minutes: Option<i64>,
    /// New priority hint.
    priority_hint: Option<Priority>,
}

/// Handle the `task_update` tool call.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: UpdateInput = parse_args(args, "task_update")?;

    if matches!(input.title.as_deref(), Some(title) if title.trim().is_empty()) {
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

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let task = repo
        .update(
            &input.id,
            TaskPatch {
                title: input.title,
                notes_md: input.notes_md,
                project: input.project,
                estimate_minutes: input.estimate_minutes,
                priority_hint: input.priority_hint,
            },
        )
        .await
        .map_err(map_app_error)?;

    info!(task_id = %task.id, "task updated");
    Ok(text_result(format!("Updated: {}", task_summary(&task))))
}
