//! MCP Server implementation and lifecycle management.
//!
//! The server owns the platform services, the aggregator and the tool
//! router. All of them are built once in [`McpServer::new`] and shared by
//! every session.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Result as ServerResult;
use crate::domains::aggregator::Aggregator;
use crate::domains::platforms::MusicServices;
use crate::domains::tools::{ToolContext, build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

const INSTRUCTIONS: &str = "Music discovery server. Search Spotify, YouTube and Last.fm individually \
or all at once with search_all_platforms, get Spotify recommendations from seed tracks, artists or \
genres, and explore Last.fm similar tracks and charts. Platforms without configured credentials \
return empty results in cross-platform searches.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared tool dependencies.
    context: ToolContext,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server, building platform clients from the config.
    pub fn new(config: Config) -> ServerResult<Self> {
        let services = Arc::new(MusicServices::from_config(&config)?);
        Ok(Self::with_services(config, services))
    }

    /// Create a server around already-built services.
    pub fn with_services(config: Config, services: Arc<MusicServices>) -> Self {
        let aggregator = Arc::new(Aggregator::new(services.clone()));
        let context = ToolContext::new(services, aggregator);

        let server = Self {
            tool_router: build_tool_router::<Self>(context.clone()),
            config: Arc::new(config),
            context,
        };
        info!(
            "{} v{} ready with {} tools",
            server.name(),
            server.version(),
            server.tool_router.list_all().len()
        );
        server
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Platform clients and availability.
    pub fn services(&self) -> &Arc<MusicServices> {
        &self.context.services
    }

    /// Cross-platform aggregator.
    pub fn aggregator(&self) -> &Arc<Aggregator> {
        &self.context.aggregator
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, ToolError> {
        let registry = ToolRegistry::new(self.context.clone());
        registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
