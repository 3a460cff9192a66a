//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of all available tools and their metadata
//! - HTTP dispatch for tool calls (when http feature is enabled)

use rmcp::model::Tool;
#[cfg(feature = "http")]
use tracing::warn;

#[cfg(feature = "http")]
use super::error::ToolError;
use super::handlers::{MusicTool, ToolContext};

use super::definitions::{
    LastfmAlbumsTool, LastfmArtistsTool, LastfmSongsTool, MusicRecommendationsTool, SearchAllTool,
    SimilarTracksTool, SpotifyAlbumsTool, SpotifyArtistsTool, SpotifyRecommendationsTool,
    SpotifyTracksTool, TopTracksTool, VideoDetailsTool, YouTubePlaylistsTool, YouTubeVideosTool,
};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    context: ToolContext,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            SearchAllTool::NAME,
            MusicRecommendationsTool::NAME,
            SpotifyTracksTool::NAME,
            SpotifyArtistsTool::NAME,
            SpotifyAlbumsTool::NAME,
            SpotifyRecommendationsTool::NAME,
            YouTubeVideosTool::NAME,
            YouTubePlaylistsTool::NAME,
            VideoDetailsTool::NAME,
            LastfmSongsTool::NAME,
            LastfmArtistsTool::NAME,
            LastfmAlbumsTool::NAME,
            SimilarTracksTool::NAME,
            TopTracksTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            SearchAllTool::to_tool(),
            MusicRecommendationsTool::to_tool(),
            SpotifyTracksTool::to_tool(),
            SpotifyArtistsTool::to_tool(),
            SpotifyAlbumsTool::to_tool(),
            SpotifyRecommendationsTool::to_tool(),
            YouTubeVideosTool::to_tool(),
            YouTubePlaylistsTool::to_tool(),
            VideoDetailsTool::to_tool(),
            LastfmSongsTool::to_tool(),
            LastfmArtistsTool::to_tool(),
            LastfmAlbumsTool::to_tool(),
            SimilarTracksTool::to_tool(),
            TopTracksTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let context = self.context.clone();
        match name {
            SearchAllTool::NAME => SearchAllTool::http_handler(context, arguments).await,
            MusicRecommendationsTool::NAME => {
                MusicRecommendationsTool::http_handler(context, arguments).await
            }
            SpotifyTracksTool::NAME => SpotifyTracksTool::http_handler(context, arguments).await,
            SpotifyArtistsTool::NAME => SpotifyArtistsTool::http_handler(context, arguments).await,
            SpotifyAlbumsTool::NAME => SpotifyAlbumsTool::http_handler(context, arguments).await,
            SpotifyRecommendationsTool::NAME => {
                SpotifyRecommendationsTool::http_handler(context, arguments).await
            }
            YouTubeVideosTool::NAME => YouTubeVideosTool::http_handler(context, arguments).await,
            YouTubePlaylistsTool::NAME => {
                YouTubePlaylistsTool::http_handler(context, arguments).await
            }
            VideoDetailsTool::NAME => VideoDetailsTool::http_handler(context, arguments).await,
            LastfmSongsTool::NAME => LastfmSongsTool::http_handler(context, arguments).await,
            LastfmArtistsTool::NAME => LastfmArtistsTool::http_handler(context, arguments).await,
            LastfmAlbumsTool::NAME => LastfmAlbumsTool::http_handler(context, arguments).await,
            SimilarTracksTool::NAME => SimilarTracksTool::http_handler(context, arguments).await,
            TopTracksTool::NAME => TopTracksTool::http_handler(context, arguments).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
