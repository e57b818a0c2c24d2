//! # Evolution API client
//!
//! Thin HTTP client for the Evolution API WhatsApp gateway. Only the two
//! operations the MCP server exposes are implemented:
//!
//! - `GET /instance/fetchInstances`
//! - `POST /message/sendText/{instance}`
//!
//! Responses are relayed as opaque [`serde_json::Value`]s; no schema is
//! imposed on what the gateway returns.
//!
//! ## Example
//!
//! ```rust,no_run
//! use evolution_api::{ApiConfig, EvolutionClient, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::from_env()?;
//!     let client = EvolutionClient::new(&config)?;
//!
//!     let instances = client.fetch_instances().await?;
//!     println!("{}", serde_json::to_string_pretty(&instances)?);
//!
//!     Ok(())
//! }
//! ```

pub mod api_key;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use api_key::ApiKey;
pub use client::{EvolutionClient, Gateway};
pub use config::{API_KEY_ENV, API_URL_ENV, ApiConfig, ConfigError, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use types::SendTextRequest;
