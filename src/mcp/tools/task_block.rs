//! `task_block` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;
use tracing::info;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::task_summary;

/// Input parameters for `task_block`.
#[derive(Debug, serde::Deserialize)]
struct BlockInput {
    /// Task identifier.
    id: String,
    /// Why the task is blocked. Required non-empty.
    reason: String,
}

/// Handle the `task_block` tool call.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: BlockInput = parse_args(args, "task_block")?;

    if input.reason.trim().is_empty() {
        return Err(rmcp::ErrorData::invalid_params(
            "reason must not be empty",
            None,
        ));
    }

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let task = repo
        .block(&input.id, &input.reason)
        .await
        .map_err(map_app_error)?;

    info!(task_id = %task.id, "task blocked");
    Ok(text_result(format!("Blocked: {}", task_summary(&task))))
}
