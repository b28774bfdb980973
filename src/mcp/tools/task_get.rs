//! `task_get` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::task_detail;

/// Input parameters for `task_get`.
#[derive(Debug, serde::Deserialize)]
struct GetInput {
    /// Task identifier.
    id: String,
}

/// Handle the `task_get` tool call.
///
/// A missing task is a normal outcome and answered with plain text,
/// not a protocol error.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: GetInput = parse_args(args, "task_get")?;

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let task = repo.get(&input.id).await.map_err(map_app_error)?;

    match task {
        Some(task) => Ok(text_result(task_detail(&task))),
        None => Ok(text_result(format!("Task not found: {}", input.id))),
    }
}
