//! Last.fm search tools: songs, artists and albums.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::CallToolResult;
use tracing::info;

use super::super::common::{
    SearchParams, require_query, results_or_empty, unavailable_result, validate_limit,
};
use crate::domains::platforms::Platform;
use crate::domains::tools::handlers::{MusicTool, ToolContext};

const PLATFORM: Platform = Platform::Lastfm;

#[derive(Debug, Clone)]
pub struct LastfmSongsTool;

impl MusicTool for LastfmSongsTool {
    const NAME: &'static str = "search_lastfm_songs";

    const DESCRIPTION: &'static str = "Search Last.fm for songs. Returns name, artist, listener count, image, MusicBrainz ID and Last.fm URL.";

    type Params = SearchParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.lastfm() else {
                return unavailable_result(PLATFORM);
            };
            let query = match require_query(&params.query) {
                Ok(query) => query,
                Err(result) => return result,
            };
            info!("Searching Last.fm songs: {}", query);
            let outcome = client.search_tracks(query, validate_limit(params.limit)).await;
            results_or_empty(PLATFORM, Some(query), outcome)
        }
        .boxed()
    }
}

#[derive(Debug, Clone)]
pub struct LastfmArtistsTool;

impl MusicTool for LastfmArtistsTool {
    const NAME: &'static str = "search_lastfm_artists";

    const DESCRIPTION: &'static str = "Search Last.fm for artists. Returns name, listener count, image, MusicBrainz ID and Last.fm URL.";

    type Params = SearchParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.lastfm() else {
                return unavailable_result(PLATFORM);
            };
            let query = match require_query(&params.query) {
                Ok(query) => query,
                Err(result) => return result,
            };
            info!("Searching Last.fm artists: {}", query);
            let outcome = client.search_artists(query, validate_limit(params.limit)).await;
            results_or_empty(PLATFORM, Some(query), outcome)
        }
        .boxed()
    }
}

#[derive(Debug, Clone)]
pub struct LastfmAlbumsTool;

impl MusicTool for LastfmAlbumsTool {
    const NAME: &'static str = "search_lastfm_albums";

    const DESCRIPTION: &'static str = "Search Last.fm for albums. Returns name, artist, image, MusicBrainz ID and Last.fm URL.";

    type Params = SearchParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.lastfm() else {
                return unavailable_result(PLATFORM);
            };
            let query = match require_query(&params.query) {
                Ok(query) => query,
                Err(result) => return result,
            };
            info!("Searching Last.fm albums: {}", query);
            let outcome = client.search_albums(query, validate_limit(params.limit)).await;
            results_or_empty(PLATFORM, Some(query), outcome)
        }
        .boxed()
    }
}
