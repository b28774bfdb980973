#![forbid(unsafe_code)]

//! `tasker` — personal task-tracking backend exposed as an MCP server.
//!
//! Tasks move through four buckets (inbox, next, doing, done); every
//! mutation is recorded in an append-only event log, and an outbox table
//! holds generated check-in digests for out-of-band delivery.

pub mod config;
pub mod errors;
pub mod mcp;
pub mod models;
pub mod persistence;
pub mod report;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
