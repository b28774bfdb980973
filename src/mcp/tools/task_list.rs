//! `task_list` MCP tool handler.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::CallToolResult;
use tracing::{info_span, Instrument};

use crate::mcp::handler::TaskServer;
use crate::mcp::tools::util::{map_app_error, parse_args, text_result};
use crate::models::task::{Bucket, TaskFilter};
use crate::persistence::task_repo::TaskRepo;
use crate::report::render::task_summary;

/// Upper bound on the caller-supplied result cap.
const MAX_LIMIT: i64 = 100;

/// Input parameters for `task_list`.
#[derive(Debug, serde::Deserialize)]
struct ListInput {
    /// Filter by bucket.
    bucket: Option<Bucket>,
    /// Filter by project.
    project: Option<String>,
    /// Include blocked tasks. Defaults to false.
    include_blocked: Option<bool>,
    /// Max results, 1 to 100.
    limit: Option<i64>,
}

/// Handle the `task_list` tool call.
///
/// # Errors
///
/// Returns `rmcp::ErrorData` on validation or persistence failures.
pub async fn handle(
    context: ToolCallContext<'_, TaskServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let state = Arc::clone(context.service.state());
    let args = context.arguments.unwrap_or_default();
    let input: ListInput = parse_args(args, "task_list")?;

    if matches!(input.limit, Some(limit) if !(1..=MAX_LIMIT).contains(&limit)) {
        return Err(rmcp::ErrorData::invalid_params(
            format!("limit must be between 1 and {MAX_LIMIT}"),
            None,
        ));
    }

    let span = info_span!("task_list", bucket = ?input.bucket);

    async move {
        let repo = TaskRepo::new(Arc::clone(&state.db), Arc::clone(&state.config));
        let tasks = repo
            .list(&TaskFilter {
                bucket: input.bucket,
                project: input.project,
                include_blocked: input.include_blocked.unwrap_or(false),
                limit: input.limit,
            })
            .await
            .map_err(map_app_error)?;

        if tasks.is_empty() {
            return Ok(text_result("No tasks found.".to_owned()));
        }

        let header = input.bucket.map_or_else(
            || format!("ALL ({})", tasks.len()),
            |bucket| format!("{} ({})", bucket.as_str().to_uppercase(), tasks.len()),
        );

        let mut lines = vec![header, String::new()];
        lines.extend(tasks.iter().map(task_summary));

        Ok(text_result(lines.join("\n")))
    }
    .instrument(span)
    .await
}
