//! Spotify catalog search tools: tracks, artists and albums.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::CallToolResult;
use tracing::info;

use super::super::common::{
    SearchParams, require_query, results_or_empty, unavailable_result, validate_limit,
};
use crate::domains::platforms::Platform;
use crate::domains::tools::handlers::{MusicTool, ToolContext};

const PLATFORM: Platform = Platform::Spotify;

#[derive(Debug, Clone)]
pub struct SpotifyTracksTool;

impl MusicTool for SpotifyTracksTool {
    const NAME: &'static str = "search_spotify_tracks";

    const DESCRIPTION: &'static str = "Search Spotify for tracks. Returns name, artist, album, duration, popularity, preview URL and Spotify link for each match.";

    type Params = SearchParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.spotify() else {
                return unavailable_result(PLATFORM);
            };
            let query = match require_query(&params.query) {
                Ok(query) => query,
                Err(result) => return result,
            };
            info!("Searching Spotify tracks: {}", query);
            let outcome = client.search_tracks(query, validate_limit(params.limit)).await;
            results_or_empty(PLATFORM, Some(query), outcome)
        }
        .boxed()
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyArtistsTool;

impl MusicTool for SpotifyArtistsTool {
    const NAME: &'static str = "search_spotify_artists";

    const DESCRIPTION: &'static str = "Search Spotify for artists. Returns name, genres, popularity, follower count and Spotify link.";

    type Params = SearchParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.spotify() else {
                return unavailable_result(PLATFORM);
            };
            let query = match require_query(&params.query) {
                Ok(query) => query,
                Err(result) => return result,
            };
            info!("Searching Spotify artists: {}", query);
            let outcome = client.search_artists(query, validate_limit(params.limit)).await;
            results_or_empty(PLATFORM, Some(query), outcome)
        }
        .boxed()
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyAlbumsTool;

impl MusicTool for SpotifyAlbumsTool {
    const NAME: &'static str = "search_spotify_albums";

    const DESCRIPTION: &'static str = "Search Spotify for albums. Returns name, artist, release date, track count, album type and Spotify link.";

    type Params = SearchParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.spotify() else {
                return unavailable_result(PLATFORM);
            };
            let query = match require_query(&params.query) {
                Ok(query) => query,
                Err(result) => return result,
            };
            info!("Searching Spotify albums: {}", query);
            let outcome = client.search_albums(query, validate_limit(params.limit)).await;
            results_or_empty(PLATFORM, Some(query), outcome)
        }
        .boxed()
    }
}
