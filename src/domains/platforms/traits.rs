//! Client traits, one per platform shape.
//!
//! The aggregator and tools only see these traits, so any implementation
//! (the HTTP clients in this module, or in-process fakes in tests) can be
//! injected into `MusicServices`.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::model::{Album, Artist, Playlist, Track, Video};

/// Seeds for a recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecommendationSeeds {
    /// Spotify track IDs.
    #[serde(default)]
    pub seed_tracks: Vec<String>,

    /// Spotify artist IDs.
    #[serde(default)]
    pub seed_artists: Vec<String>,

    /// Genre names (e.g. "jazz").
    #[serde(default)]
    pub seed_genres: Vec<String>,
}

impl RecommendationSeeds {
    /// Whether no seed of any kind was supplied.
    pub fn is_empty(&self) -> bool {
        self.seed_tracks.is_empty() && self.seed_artists.is_empty() && self.seed_genres.is_empty()
    }
}

/// A streaming catalog: tracks, artists, albums and recommendations.
#[async_trait]
pub trait CatalogPlatform: Send + Sync {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>>;

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>>;

    async fn search_albums(&self, query: &str, limit: u32) -> Result<Vec<Album>>;

    /// Seeded track recommendations. Seeds are passed through as given.
    async fn recommendations(&self, seeds: &RecommendationSeeds, limit: u32) -> Result<Vec<Track>>;
}

/// A video platform: music videos and playlists.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    async fn search_videos(&self, query: &str, limit: u32) -> Result<Vec<Video>>;

    async fn search_playlists(&self, query: &str, limit: u32) -> Result<Vec<Playlist>>;

    /// Detailed information about one video, `None` if it does not exist.
    async fn video_details(&self, video_id: &str) -> Result<Option<Video>>;
}

/// A scrobbling and charts service.
#[async_trait]
pub trait ScrobblePlatform: Send + Sync {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>>;

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>>;

    async fn search_albums(&self, query: &str, limit: u32) -> Result<Vec<Album>>;

    async fn similar_tracks(&self, artist: &str, track: &str, limit: u32) -> Result<Vec<Track>>;

    async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>>;
}
