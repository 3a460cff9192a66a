//! Search every configured platform at once.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::super::common::{json_error_result, json_result};
use crate::domains::aggregator::DEFAULT_SEARCH_LIMIT;
use crate::domains::tools::handlers::{MusicTool, ToolContext};

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

/// Parameters for the cross-platform search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchAllParams {
    #[schemars(description = "Search query (song, artist, album or free text)")]
    pub query: String,

    #[schemars(description = "Maximum results per platform and category (default: 5, max: 50)")]
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct SearchAllTool;

impl MusicTool for SearchAllTool {
    const NAME: &'static str = "search_all_platforms";

    const DESCRIPTION: &'static str = "Search Spotify, YouTube and Last.fm concurrently and return one merged result. Every platform section is always present; platforms that are not configured or that fail return empty lists.";

    type Params = SearchAllParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            info!("Cross-platform search: '{}' (limit {})", params.query, params.limit);
            let response = context.aggregator.search_all(&params.query, params.limit).await;
            if response.is_error() {
                json_error_result(&response)
            } else {
                json_result(&response)
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::platforms::Platform;
    use crate::domains::platforms::testing::Fakes;
    use crate::domains::tools::definitions::common::test_support::{is_error, json_of};

    #[tokio::test]
    async fn test_search_all_defaults_to_five() {
        let fakes = Fakes::healthy(&Platform::ALL, 10);
        let context = ToolContext::from_services(fakes.services());
        let params: SearchAllParams = serde_json::from_value(serde_json::json!({"query": "jazz"})).unwrap();
        assert_eq!(params.limit, 5);

        let result = SearchAllTool::execute(context, params).await;

        assert!(!is_error(&result));
        let value = json_of(&result);
        assert_eq!(value["status"], "success");
        assert_eq!(value["spotify"]["tracks"].as_array().unwrap().len(), 5);
        assert_eq!(value["youtube"]["playlists"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_blank_query_is_tool_error() {
        let fakes = Fakes::healthy(&Platform::ALL, 10);
        let context = ToolContext::from_services(fakes.services());
        let params = SearchAllParams {
            query: " ".to_string(),
            limit: 5,
        };

        let result = SearchAllTool::execute(context, params).await;

        assert!(is_error(&result));
        let value = json_of(&result);
        assert_eq!(value["status"], "error");
        assert!(value.get("spotify").is_none());
    }
}
