//! MCP error types
//!
//! [`ToolError`] covers everything that can go wrong inside a single tool
//! call. The dispatcher turns each of them into an error-flagged result, so
//! they never reach the transport. [`ServerError`] covers the server
//! lifecycle itself.

use crate::registry::ToolName;
use evolution_api::ApiError;
use thiserror::Error;

/// Tool call result type
pub type ToolResult<T> = Result<T, ToolError>;

/// Server lifecycle result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors raised while handling a single tool call
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool needs arguments and the call carried none at all
    #[error("Arguments are required for {tool}")]
    ArgumentsMissing { tool: ToolName },

    /// One or more required arguments are absent or empty
    #[error("Missing required arguments for {tool}")]
    MissingRequiredArguments { tool: ToolName },

    /// An argument is present but has the wrong JSON type
    #[error("Invalid argument '{argument}' for {tool}: expected {expected}")]
    InvalidArgument {
        tool: ToolName,
        argument: &'static str,
        expected: &'static str,
    },

    /// The gateway call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The gateway result could not be rendered as text
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create an invalid argument error
    pub fn invalid_argument(tool: ToolName, argument: &'static str, expected: &'static str) -> Self {
        Self::InvalidArgument {
            tool,
            argument,
            expected,
        }
    }

    /// Short category used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::ArgumentsMissing { .. }
            | ToolError::MissingRequiredArguments { .. }
            | ToolError::InvalidArgument { .. } => "argument",
            ToolError::Api(_) => "remote",
            ToolError::Serialization(_) => "internal",
        }
    }
}

/// Errors that stop the server itself
#[derive(Debug, Error)]
pub enum ServerError {
    /// The MCP session could not be established
    #[error("Transport error: {0}")]
    Transport(String),

    /// The running session ended abnormally
    #[error("Server task failed: {0}")]
    Task(String),
}
