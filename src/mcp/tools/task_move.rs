//! `task_move` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;
use tracing::info;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::models::task::Bucket;
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::task_summary;

/// Input parameters for `task_move`.
#[derive(Debug, serde::Deserialize)]
struct MoveInput {
    /// Task identifier.
    id: String,
    /// Target bucket.
    bucket: Bucket,
}

/// Handle the `task_move` tool call.
///
/// Moving does not clear a blocked reason; only completion does.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: MoveInput = parse_args(args, "task_move")?;

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let task = repo
        .move_to(&input.id, input.bucket)
        .await
        .map_err(map_app_error)?;

    info!(task_id = %task.id, bucket = input.bucket.as_str(), "task moved");
    Ok(text_result(format!(
        "Moved to {}: {}",
        input.bucket.as_str(),
        task_summary(&task)
    )))
}
