//! Music discovery MCP server.
//!
//! Exposes search and recommendation tools for Spotify, YouTube and Last.fm
//! over the Model Context Protocol, plus a cross-platform search that queries
//! every configured platform concurrently and merges the results.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **platforms**: upstream clients and normalized records
//!   - **aggregator**: concurrent fan-out and response envelopes
//!   - **tools**: the MCP tool surface
//!
//! # Example
//!
//! ```rust,no_run
//! use music_discovery_mcp::core::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     let response = server.aggregator().search_all("jazz", 5).await;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::aggregator::{AggregatedResponse, Aggregator, RecommendationResponse};
pub use domains::platforms::{MusicServices, Platform};
