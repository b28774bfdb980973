//! `tasks_today` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, text_result};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::today_plan_view;

/// Handle the `tasks_today` tool call.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let tasks = repo.today_plan().await.map_err(map_app_error)?;

    if tasks.is_empty() {
        return Ok(text_result(
            "No tasks in today plan. Move tasks to Doing or Next to start.".to_owned(),
        ));
    }

    Ok(text_result(today_plan_view(&tasks)))
}
