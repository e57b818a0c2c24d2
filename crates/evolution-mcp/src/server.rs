//! MCP server exposing the Evolution API tools

use crate::dispatch::Dispatcher;
use crate::error::{ServerError, ServerResult};
use crate::registry::ToolRegistry;
use evolution_api::Gateway;
use rmcp::{
    ErrorData, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ToolsCapability,
    },
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Server information
#[derive(Debug, Clone)]
struct ServerInfo {
    name: String,
    version: String,
    description: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "evolution-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Send WhatsApp messages and list instances through the Evolution API"
                .to_string(),
        }
    }
}

/// MCP server that routes tool calls to an Evolution API gateway
pub struct EvolutionMcpServer<G> {
    registry: Arc<ToolRegistry>,
    dispatcher: Dispatcher<G>,
    server_info: ServerInfo,
}

impl<G> Clone for EvolutionMcpServer<G> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            dispatcher: self.dispatcher.clone(),
            server_info: self.server_info.clone(),
        }
    }
}

impl<G: Gateway + 'static> EvolutionMcpServer<G> {
    /// Create a new MCP server over a gateway
    pub fn new(gateway: G) -> Self {
        Self {
            registry: Arc::new(ToolRegistry::new()),
            dispatcher: Dispatcher::new(gateway),
            server_info: ServerInfo::default(),
        }
    }

    /// Serve via stdio (stdin/stdout) - standard MCP transport
    ///
    /// Returns once the client disconnects. Logging must not go to stdout
    /// while this runs.
    pub async fn serve_stdio(self) -> ServerResult<()> {
        info!(
            server = %self.server_info.name,
            version = %self.server_info.version,
            tools = self.registry.tools().len(),
            "Starting MCP server on stdio"
        );

        for tool in self.registry.tools() {
            debug!(tool = %tool.name, "Registered tool");
        }

        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| ServerError::Task(e.to_string()))?;

        info!(reason = ?reason, "MCP server stopped");
        Ok(())
    }
}

impl<G: Gateway + 'static> ServerHandler for EvolutionMcpServer<G> {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: self.server_info.name.clone(),
                version: self.server_info.version.clone(),
                ..Default::default()
            },
            instructions: Some(self.server_info.description.clone()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.registry.list_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self
            .dispatcher
            .dispatch(request.name.as_ref(), request.arguments)
            .await;

        Ok(response.into_call_tool_result())
    }
}
