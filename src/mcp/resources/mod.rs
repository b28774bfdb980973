//! MCP resource handlers.

pub mod task_views;
