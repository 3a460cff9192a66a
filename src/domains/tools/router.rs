//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Each tool creates its own route from the shared `ToolContext`.

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    LastfmAlbumsTool, LastfmArtistsTool, LastfmSongsTool, MusicRecommendationsTool, SearchAllTool,
    SimilarTracksTool, SpotifyAlbumsTool, SpotifyArtistsTool, SpotifyRecommendationsTool,
    SpotifyTracksTool, TopTracksTool, VideoDetailsTool, YouTubePlaylistsTool, YouTubeVideosTool,
};
use super::handlers::{MusicTool, ToolContext};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(context: ToolContext) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SearchAllTool::create_route(context.clone()))
        .with_route(MusicRecommendationsTool::create_route(context.clone()))
        .with_route(SpotifyTracksTool::create_route(context.clone()))
        .with_route(SpotifyArtistsTool::create_route(context.clone()))
        .with_route(SpotifyAlbumsTool::create_route(context.clone()))
        .with_route(SpotifyRecommendationsTool::create_route(context.clone()))
        .with_route(YouTubeVideosTool::create_route(context.clone()))
        .with_route(YouTubePlaylistsTool::create_route(context.clone()))
        .with_route(VideoDetailsTool::create_route(context.clone()))
        .with_route(LastfmSongsTool::create_route(context.clone()))
        .with_route(LastfmArtistsTool::create_route(context.clone()))
        .with_route(LastfmAlbumsTool::create_route(context.clone()))
        .with_route(SimilarTracksTool::create_route(context.clone()))
        .with_route(TopTracksTool::create_route(context))
}
