//! MCP server handler, shared application state, and tool router.

use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::{
    tool::{ToolCallContext, ToolRoute, ToolRouter},
    ServerHandler,
};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ListResourcesResult, ListToolsResult,
    PaginatedRequestParam, ReadResourceRequestParam, ReadResourceResult, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use tracing::info_span;

use crate::config::GlobalConfig;
use crate::mcp::resources::task_views;
use crate::persistence::db::Database;

/// Shared application state accessible by all MCP tool handlers.
pub struct AppState {
    /// Global configuration, including the mutation gate.
    pub config: Arc<GlobalConfig>,
    /// `SQLite` connection pool.
    pub db: Arc<Database>,
}

/// MCP server implementation exposing the eleven task tools and the
/// read-only task-view resources.
pub struct TaskServer {
    state: Arc<AppState>,
}

impl TaskServer {
    /// Create a new MCP server bound to shared application state.
    #[must_use]
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Access the shared application state.
    #[must_use]
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    fn tool_router() -> ToolRouter<Self> {
        let mut router = ToolRouter::new();

        for tool in Self::all_tools() {
            let name = tool.name.to_string();
            match name.as_str() {
                "task_create" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::task_create::handle(context))
                    }));
                }
                "task_update" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::task_update::handle(context))
                    }));
                }
                "task_move" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::task_move::handle(context))
                    }));
                }
                "task_complete" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::task_complete::handle(context))
                    }));
                }
                "task_block" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::task_block::handle(context))
                    }));
                }
                "task_unblock" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::task_unblock::handle(context))
                    }));
                }
                "task_list" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::task_list::handle(context))
                    }));
                }
                "task_get" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::task_get::handle(context))
                    }));
                }
                "tasks_today" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::tasks_today::handle(context))
                    }));
                }
                "tasks_review" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::tasks_review::handle(context))
                    }));
                }
                "tasks_count" => {
                    router.add_route(ToolRoute::new_dyn(tool, |context| {
                        Box::pin(crate::mcp::tools::tasks_count::handle(context))
                    }));
                }
                _ => {
                    router.add_route(ToolRoute::new_dyn(tool, |_context| {
                        Box::pin(async {
                            Err(rmcp::ErrorData::internal_error(
                                "tool not implemented",
                                None,
                            ))
                        })
                    }));
                }
            }
        }

        router
    }

    /// Convert a `serde_json::Value::Object` into the `Arc<Map>` expected by `Tool`.
    fn schema(value: serde_json::Value) -> Arc<serde_json::Map<String, serde_json::Value>> {
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::default()),
        }
    }

    #[allow(clippy::too_many_lines)] // Tool definitions are intentionally verbose for clarity.
    fn all_tools() -> Vec<Tool> {
        vec![
            Tool {
                name: "task_create".into(),
                description: Some("Create a new task in a bucket".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "description": "Task title" },
                        "bucket": { "type": "string", "enum": ["inbox", "next", "doing", "done"], "description": "Target bucket (defaults to inbox)" },
                        "notes_md": { "type": "string", "description": "Additional notes in markdown" },
                        "project": { "type": "string", "description": "Project name" },
                        "estimate_minutes": { "type": "integer", "minimum": 1, "description": "Time estimate in minutes" },
                        "priority_hint": { "type": "string", "enum": ["p1", "p2", "p3"], "description": "Priority hint (p1=high, p3=low)" }
                    },
                    "required": ["title"]
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "task_update".into(),
                description: Some("Update task fields (title, notes, estimate, priority)".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Task ID" },
                        "title": { "type": "string", "description": "New title" },
                        "notes_md": { "type": "string", "description": "New notes" },
                        "project": { "type": "string", "description": "New project" },
                        "estimate_minutes": { "type": "integer", "minimum": 1, "description": "New time estimate" },
                        "priority_hint": { "type": "string", "enum": ["p1", "p2", "p3"], "description": "New priority hint" }
                    },
                    "required": ["id"]
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "task_move".into(),
                description: Some("Move a task between buckets".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Task ID" },
                        "bucket": { "type": "string", "enum": ["inbox", "next", "doing", "done"], "description": "Target bucket" }
                    },
                    "required": ["id", "bucket"]
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "task_complete".into(),
                description: Some("Mark a task as done".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Task ID" }
                    },
                    "required": ["id"]
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "task_block".into(),
                description: Some("Block a task with a reason".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Task ID" },
                        "reason": { "type": "string", "description": "Why the task is blocked" }
                    },
                    "required": ["id", "reason"]
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "task_unblock".into(),
                description: Some("Unblock a task".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Task ID" }
                    },
                    "required": ["id"]
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "task_list".into(),
                description: Some("List tasks by bucket with optional filters".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "bucket": { "type": "string", "enum": ["inbox", "next", "doing", "done"], "description": "Filter by bucket" },
                        "project": { "type": "string", "description": "Filter by project" },
                        "include_blocked": { "type": "boolean", "description": "Include blocked tasks" },
                        "limit": { "type": "integer", "minimum": 1, "maximum": 100, "description": "Max results" }
                    }
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "task_get".into(),
                description: Some("Get a single task by ID".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Task ID" }
                    },
                    "required": ["id"]
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "tasks_today".into(),
                description: Some("Get today plan (Doing + top Next tasks, max 7)".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {}
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "tasks_review".into(),
                description: Some("Get stale tasks that need attention".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "stale_days": { "type": "integer", "minimum": 1, "default": 7, "description": "Days without update to consider stale" }
                    }
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "tasks_count".into(),
                description: Some("Get task counts by bucket".into()),
                input_schema: Self::schema(serde_json::json!({
                    "type": "object",
                    "properties": {}
                })),
                output_schema: None,
                annotations: None,
                title: None,
                icons: None,
                meta: None,
            },
        ]
    }
}

impl ServerHandler for TaskServer {
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, rmcp::ErrorData>> + Send + '_ {
        let router = Self::tool_router();
        let _span = info_span!("call_tool", tool = %request.name).entered();

        async move {
            router
                .call(ToolCallContext::new(self, request, context))
                .await
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, rmcp::ErrorData>> + Send + '_ {
        let tools = Self::all_tools();

        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListResourcesResult, rmcp::ErrorData>> + Send + '_ {
        std::future::ready(Ok(task_views::list_resources()))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ReadResourceResult, rmcp::ErrorData>> + Send + '_ {
        let state = Arc::clone(&self.state);

        async move {
            task_views::read_resource(&request, &state)
                .await
                .map_err(|err| rmcp::ErrorData::internal_error(err.to_string(), None))
        }
    }
}
