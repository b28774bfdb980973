//! Shared utilities for MCP tool handlers.

use rmcp::model::{CallToolResult, Content};
use serde::de::DeserializeOwned;

use crate::AppError;

/// Deserialize tool arguments into a typed input struct.
///
/// # Errors
///
/// Returns `invalid_params` when the arguments do not match the
/// declared schema (wrong types, unknown enum values, missing
/// required fields).
pub fn parse_args<T: DeserializeOwned>(
    args: serde_json::Map<String, serde_json::Value>,
    tool: &str,
) -> Result<T, rmcp::ErrorData> {
    serde_json::from_value(serde_json::Value::Object(args)).map_err(|err| {
        rmcp::ErrorData::invalid_params(format!("invalid {tool} parameters: {err}"), None)
    })
}

/// Wrap plain text in a successful tool result.
#[must_use]
pub fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Map a domain error onto the MCP error surface.
///
/// Boundary rejections and missing ids become `invalid_params`; the
/// disabled mutation gate becomes `invalid_request`; storage and other
/// internal failures become `internal_error`.
#[must_use]
pub fn map_app_error(err: AppError) -> rmcp::ErrorData {
    match err {
        AppError::Validation(_) | AppError::NotFound(_) => {
            rmcp::ErrorData::invalid_params(err.to_string(), None)
        }
        AppError::MutationsDisabled => rmcp::ErrorData::invalid_request(err.to_string(), None),
        AppError::Config(_) | AppError::Db(_) | AppError::Mcp(_) => {
            rmcp::ErrorData::internal_error(err.to_string(), None)
        }
    }
}
