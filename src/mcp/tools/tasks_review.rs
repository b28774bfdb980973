//! `tasks_review` MCP tool handler.

use std::sync::Arc;

use chrono::Utc;
use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::{days_ago, task_summary};

/// Default staleness threshold in days.
const DEFAULT_STALE_DAYS: i64 = 7;

/// Input parameters for `tasks_review`.
#[derive(Debug, serde::Deserialize)]
struct ReviewInput {
    /// Days without update to consider stale. Defaults to 7.
    stale_days: Option<i64>,
}

/// Handle the `tasks_review` tool call.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: ReviewInput = parse_args(args, "tasks_review")?;

    let stale_days = input.stale_days.unwrap_or(DEFAULT_STALE_DAYS);
    if stale_days < 1 {
        return Err(rmcp::ErrorData::invalid_params(
            "stale_days must be positive",
            None,
        ));
    }

    let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
    let tasks = repo.stale(stale_days).await.map_err(map_app_error)?;

    if tasks.is_empty() {
        return Ok(text_result(format!(
            "No stale tasks (>{stale_days} days without update)."
        )));
    }

    let now = Utc::now();
    let mut lines = vec![
        format!(
            "STALE TASKS ({} tasks not updated in {stale_days}+ days)",
            tasks.len()
        ),
        String::new(),
    ];
    lines.extend(tasks.iter().map(|t| {
        let days = days_ago(t.updated_at, now);
        format!("{} [{days}d ago]", task_summary(t))
    }));

    Ok(text_result(lines.join("\n")))
}
