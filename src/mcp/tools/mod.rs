//! MCP tool handler modules, one per tool.

pub mod task_block;
pub mod task_complete;
pub mod task_create;
pub mod task_get;
pub mod task_list;
pub mod task_move;
pub mod task_unblock;
pub mod task_update;
pub mod tasks_count;
pub mod tasks_review;
pub mod tasks_today;
pub mod util;
