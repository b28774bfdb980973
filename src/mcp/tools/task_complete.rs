//! `task_complete` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;
use tracing::info;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::task_summary;

/// Input parameters for `task_complete`.
#[derive(Debug, serde::Deserialize)]
struct CompleteInput {
    /// Task identifier.
    id: String,
}

/// Handle the `task_complete` tool call.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: CompleteInput = parse_args(args, "task_complete")?;

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let task = repo.complete(&input.id).await.map_err(map_app_error)?;

    info!(task_id = %task.id, "task completed");
    Ok(text_result(format!("Completed: {}", task_summary(&task))))
}
