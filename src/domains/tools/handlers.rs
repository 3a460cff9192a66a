//! Shared tool plumbing.
//!
//! Every tool implements [`MusicTool`]: a name, a description, a parameter
//! type and an async `execute`. The trait derives the MCP metadata, the
//! rmcp route used by STDIO/TCP, and the JSON handler used by HTTP.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::ToolError;
use crate::domains::aggregator::Aggregator;
use crate::domains::platforms::MusicServices;

/// Handles every tool needs: the platform clients and the aggregator.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub services: Arc<MusicServices>,
    pub aggregator: Arc<Aggregator>,
}

impl ToolContext {
    pub fn new(services: Arc<MusicServices>, aggregator: Arc<Aggregator>) -> Self {
        Self {
            services,
            aggregator,
        }
    }

    /// Context whose aggregator shares the given services.
    pub fn from_services(services: Arc<MusicServices>) -> Self {
        let aggregator = Arc::new(Aggregator::new(services.clone()));
        Self::new(services, aggregator)
    }
}

/// Deserialize a tool argument bag into its parameter type.
pub fn parse_params<P>(arguments: serde_json::Map<String, serde_json::Value>) -> Result<P, ToolError>
where
    P: DeserializeOwned,
{
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// A music tool exposed over MCP.
pub trait MusicTool: Sized + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Run the tool. Upstream failures are reported inside the result,
    /// never as an `Err`.
    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    fn create_route<S>(context: ToolContext) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let context = context.clone();
            async move {
                let params: Self::Params = parse_params(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok::<_, McpError>(Self::execute(context, params).await)
            }
            .boxed()
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    fn http_handler(
        context: ToolContext,
        arguments: serde_json::Value,
    ) -> BoxFuture<'static, Result<serde_json::Value, ToolError>> {
        async move {
            let arguments = match arguments {
                serde_json::Value::Object(map) => map,
                serde_json::Value::Null => serde_json::Map::new(),
                other => {
                    return Err(ToolError::invalid_arguments(format!(
                        "arguments must be an object, got {}",
                        other
                    )));
                }
            };
            let params: Self::Params = parse_params(arguments)?;
            let result = Self::execute(context, params).await;

            Ok::<_, ToolError>(serde_json::json!({
                "content": result.content,
                "isError": result.is_error.unwrap_or(false)
            }))
        }
        .boxed()
    }
}
