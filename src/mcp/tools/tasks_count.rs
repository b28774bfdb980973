//! `tasks_count` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, text_result};
use crate::persistence::task_repo::TaskRepo;

/// Handle the `tasks_count` tool call.
///
/// Always reports all four buckets, zero-filled.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let counts = repo.counts().await.map_err(map_app_error)?;

    Ok(text_result(
        [
            "Task counts:".to_owned(),
            format!("  Inbox: {}", counts.inbox),
            format!("  Next:  {}", counts.next),
            format!("  Doing: {}", counts.doing),
            format!("  Done:  {}", counts.done),
        ]
        .join("\n"),
    ))
}
