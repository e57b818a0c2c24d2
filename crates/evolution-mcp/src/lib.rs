//! # Evolution MCP - WhatsApp gateway tools over the Model Context Protocol
//!
//! This crate exposes two Evolution API operations as MCP tools:
//!
//! - **fetchInstances**: list the WhatsApp instances the gateway manages
//! - **sendText**: send a text message through one of those instances
//!
//! Every call produces exactly one text block. Gateway results are relayed
//! verbatim as pretty-printed JSON; failures come back as error-flagged
//! results instead of protocol faults.
//!
//! ## Example: MCP Server
//!
//! ```rust,no_run
//! use evolution_api::{ApiConfig, EvolutionClient};
//! use evolution_mcp::EvolutionMcpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::from_env()?;
//!     let client = EvolutionClient::new(&config)?;
//!
//!     EvolutionMcpServer::new(client).serve_stdio().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod server;

pub use dispatch::{Dispatcher, SendTextArgs, ToolCall};
pub use envelope::ToolResponse;
pub use error::{ServerError, ServerResult, ToolError, ToolResult};
pub use registry::{ToolDescriptor, ToolName, ToolRegistry};
pub use server::EvolutionMcpServer;
