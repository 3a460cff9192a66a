//! Seeded recommendations through the aggregator.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;

use super::super::common::{json_error_result, json_result};
use crate::domains::aggregator::DEFAULT_RECOMMENDATION_LIMIT;
use crate::domains::platforms::RecommendationSeeds;
use crate::domains::tools::handlers::{MusicTool, ToolContext};

fn default_recommendation_limit() -> u32 {
    DEFAULT_RECOMMENDATION_LIMIT
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MusicRecommendationsParams {
    #[schemars(description = "Spotify track IDs to seed from")]
    #[serde(default)]
    pub seed_tracks: Vec<String>,

    #[schemars(description = "Spotify artist IDs to seed from")]
    #[serde(default)]
    pub seed_artists: Vec<String>,

    #[schemars(description = "Number of recommendations (default: 10, max: 50)")]
    #[serde(default = "default_recommendation_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct MusicRecommendationsTool;

impl MusicTool for MusicRecommendationsTool {
    const NAME: &'static str = "get_music_recommendations";

    const DESCRIPTION: &'static str = "Get track recommendations from Spotify seeded by track and/or artist IDs. Returns {recommendations, status} or {status: \"error\", message}.";

    type Params = MusicRecommendationsParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let seeds = RecommendationSeeds {
                seed_tracks: params.seed_tracks,
                seed_artists: params.seed_artists,
                seed_genres: Vec::new(),
            };
            let response = context.aggregator.get_recommendations(&seeds, params.limit).await;
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
    async fn test_recommendations_from_seeds() {
        let fakes = Fakes::healthy(&[Platform::Spotify], 20);
        let context = ToolContext::from_services(fakes.services());
        let params: MusicRecommendationsParams = serde_json::from_value(serde_json::json!({
            "seed_tracks": ["4uLU6hMCjMI75M1A2tKUQC"]
        }))
        .unwrap();

        let result = MusicRecommendationsTool::execute(context, params).await;

        assert!(!is_error(&result));
        let value = json_of(&result);
        assert_eq!(value["status"], "success");
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_missing_spotify_is_error_envelope() {
        let fakes = Fakes::healthy(&[], 0);
        let context = ToolContext::from_services(fakes.services());
        let params: MusicRecommendationsParams =
            serde_json::from_value(serde_json::json!({})).unwrap();

        let result = MusicRecommendationsTool::execute(context, params).await;

        assert!(is_error(&result));
        let value = json_of(&result);
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Spotify service unavailable");
    }
}
