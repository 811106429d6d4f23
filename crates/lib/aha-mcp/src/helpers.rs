use std::borrow::Cow;

use aha_core::error::ControlError;
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Classified handler errors pass through with their message intact.
pub(crate) fn map_err(err: ControlError) -> ErrorData {
    match err {
        ControlError::InvalidParams(message) => mcp_err(ErrorCode::INVALID_PARAMS, message),
        ControlError::Internal(message) => mcp_err(ErrorCode::INTERNAL_ERROR, message),
    }
}

pub(crate) fn unknown_tool(name: &str) -> ErrorData {
    mcp_err(ErrorCode::METHOD_NOT_FOUND, format!("Unknown tool: {name}"))
}

pub(crate) fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}
