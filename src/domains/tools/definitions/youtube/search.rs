//! YouTube search tools for music videos and playlists.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::CallToolResult;
use tracing::info;

use super::super::common::{
    VideoSearchParams, require_query, results_or_empty, unavailable_result, validate_limit,
};
use crate::domains::platforms::Platform;
use crate::domains::tools::handlers::{MusicTool, ToolContext};

const PLATFORM: Platform = Platform::YouTube;

#[derive(Debug, Clone)]
pub struct YouTubeVideosTool;

impl MusicTool for YouTubeVideosTool {
    const NAME: &'static str = "search_youtube_videos";

    const DESCRIPTION: &'static str = "Search YouTube for music videos (Music category, ordered by relevance). Returns title, channel, thumbnail, publish date and watch URL.";

    type Params = VideoSearchParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.youtube() else {
                return unavailable_result(PLATFORM);
            };
            let query = match require_query(&params.query) {
                Ok(query) => query,
                Err(result) => return result,
            };
            info!("Searching YouTube videos: {}", query);
            let outcome = client
                .search_videos(query, validate_limit(params.max_results))
                .await;
            results_or_empty(PLATFORM, Some(query), outcome)
        }
        .boxed()
    }
}

#[derive(Debug, Clone)]
pub struct YouTubePlaylistsTool;

impl MusicTool for YouTubePlaylistsTool {
    const NAME: &'static str = "search_youtube_playlists";

    const DESCRIPTION: &'static str = "Search YouTube for playlists. Returns title, channel, thumbnail and playlist URL.";

    type Params = VideoSearchParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.youtube() else {
                return unavailable_result(PLATFORM);
            };
            let query = match require_query(&params.query) {
                Ok(query) => query,
                Err(result) => return result,
            };
            info!("Searching YouTube playlists: {}", query);
            let outcome = client
                .search_playlists(query, validate_limit(params.max_results))
                .await;
            results_or_empty(PLATFORM, Some(query), outcome)
        }
        .boxed()
    }
}
