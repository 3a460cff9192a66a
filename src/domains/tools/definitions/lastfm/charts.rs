//! Last.fm similar-track and chart tools.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::super::common::{
    default_limit, error_result, results_or_empty, unavailable_result, validate_limit,
};
use crate::domains::platforms::Platform;
use crate::domains::tools::handlers::{MusicTool, ToolContext};

const PLATFORM: Platform = Platform::Lastfm;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SimilarTracksParams {
    #[schemars(description = "Artist name")]
    pub artist: String,

    #[schemars(description = "Track name")]
    pub track: String,

    #[schemars(description = "Maximum number of results (default: 10, max: 50)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct SimilarTracksTool;

impl MusicTool for SimilarTracksTool {
    const NAME: &'static str = "get_lastfm_similar_tracks";

    const DESCRIPTION: &'static str = "Find tracks similar to a given artist and track on Last.fm, with a similarity score for each.";

    type Params = SimilarTracksParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.lastfm() else {
                return unavailable_result(PLATFORM);
            };
            let (artist, track) = (params.artist.trim(), params.track.trim());
            if artist.is_empty() || track.is_empty() {
                return error_result("Both artist and track are required");
            }

            info!("Finding tracks similar to {} - {}", artist, track);
            let outcome = client
                .similar_tracks(artist, track, validate_limit(params.limit))
                .await;
            results_or_empty(PLATFORM, Some(&format!("{} - {}", artist, track)), outcome)
        }
        .boxed()
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TopTracksParams {
    #[schemars(description = "Maximum number of results (default: 10, max: 50)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct TopTracksTool;

impl MusicTool for TopTracksTool {
    const NAME: &'static str = "get_lastfm_top_tracks";

    const DESCRIPTION: &'static str = "Get the current global top tracks chart from Last.fm, with listener and play counts.";

    type Params = TopTracksParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.lastfm() else {
                return unavailable_result(PLATFORM);
            };
            info!("Fetching Last.fm top tracks");
            let outcome = client.top_tracks(validate_limit(params.limit)).await;
            results_or_empty(PLATFORM, None, outcome)
        }
        .boxed()
    }
}
