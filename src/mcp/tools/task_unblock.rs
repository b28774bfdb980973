//! `task_unblock` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;
use tracing::info;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::task_summary;

/// Input parameters for `task_unblock`.
#[derive(Debug, serde::Deserialize)]
struct UnblockInput {
    /// Task identifier.
    id: String,
}

/// Handle the `task_unblock` tool call. Idempotent on an
/// already-unblocked task.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: UnblockInput = parse_args(args, "task_unblock")?;

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let task = repo.unblock(&input.id).await.map_err(map_app_error)?;

    info!(task_id = %task.id, "task unblocked");
    Ok(text_result(format!("Unblocked: {}", task_summary(&task))))
}
