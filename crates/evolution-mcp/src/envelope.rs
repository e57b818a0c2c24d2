//! Uniform tool response
//!
//! Every tool call, successful or not, yields one [`ToolResponse`]: a single
//! text block plus an error flag.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// Result of one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    text: String,
    is_error: bool,
}

impl ToolResponse {
    /// Successful response carrying plain text
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Successful response carrying a gateway result, pretty-printed with
    /// two-space indentation and the gateway's key order
    pub fn json(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::to_string_pretty(value).map(Self::success)
    }

    /// Error-flagged response
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// The single text block
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Convert into the MCP `tools/call` result
    pub fn into_call_tool_result(self) -> CallToolResult {
        let content = vec![Content::text(self.text)];
        if self.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}
