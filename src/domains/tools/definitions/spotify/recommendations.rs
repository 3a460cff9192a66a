//! Spotify recommendations with track, artist and genre seeds.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;

use super::super::common::{default_limit, results_or_empty, unavailable_result, validate_limit};
use crate::domains::platforms::{Platform, RecommendationSeeds};
use crate::domains::tools::handlers::{MusicTool, ToolContext};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpotifyRecommendationsParams {
    #[serde(flatten)]
    pub seeds: RecommendationSeeds,

    #[schemars(description = "Number of recommendations (default: 10, max: 50)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct SpotifyRecommendationsTool;

impl MusicTool for SpotifyRecommendationsTool {
    const NAME: &'static str = "get_spotify_recommendations";

    const DESCRIPTION: &'static str = "Get Spotify track recommendations from seed track IDs, artist IDs and/or genre names. Seeds are passed to Spotify unchanged.";

    type Params = SpotifyRecommendationsParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.spotify() else {
                return unavailable_result(Platform::Spotify);
            };
            let outcome = client
                .recommendations(&params.seeds, validate_limit(params.limit))
                .await;
            results_or_empty(Platform::Spotify, None, outcome)
        }
        .boxed()
    }
}
