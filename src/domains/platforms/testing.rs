//! In-process platform fakes with call counters.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::error::{PlatformError, Result};
use super::model::{Album, Artist, Platform, Playlist, Track, Video};
use super::services::MusicServices;
use super::traits::{CatalogPlatform, RecommendationSeeds, ScrobblePlatform, VideoPlatform};

/// A fake platform returning `size` records per operation, ignoring the
/// requested limit so that truncation can be observed.
pub struct MockPlatform {
    platform: Platform,
    size: usize,
    fail_on: Option<&'static str>,
    panic_on: Option<&'static str>,
    calls: AtomicUsize,
}

impl MockPlatform {
    pub fn healthy(platform: Platform, size: usize) -> Self {
        Self {
            platform,
            size,
            fail_on: None,
            panic_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail the named operation with a status error.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Panic inside the named operation.
    pub fn panicking_on(mut self, operation: &'static str) -> Self {
        self.panic_on = Some(operation);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, operation: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on == Some(operation) {
            panic!("{} exploded", operation);
        }
        if self.fail_on == Some(operation) {
            return Err(PlatformError::Status {
                platform: self.platform,
                status: 500,
                body: format!("{} unavailable", operation),
            });
        }
        Ok(())
    }

    fn url(&self, kind: &str, i: usize) -> String {
        format!("https://{}.example/{}/{}", self.platform.as_str(), kind, i)
    }

    fn tracks(&self, query: &str) -> Vec<Track> {
        (0..self.size)
            .map(|i| {
                let mut track = Track::new(self.platform, format!("{} track {}", query, i), self.url("track", i));
                track.artist = Some(format!("{} artist", query));
                track
            })
            .collect()
    }

    fn artists(&self, query: &str) -> Vec<Artist> {
        (0..self.size)
            .map(|i| Artist::new(self.platform, format!("{} artist {}", query, i), self.url("artist", i)))
            .collect()
    }

    fn albums(&self, query: &str) -> Vec<Album> {
        (0..self.size)
            .map(|i| Album::new(self.platform, format!("{} album {}", query, i), self.url("album", i)))
            .collect()
    }
}

#[async_trait]
impl CatalogPlatform for MockPlatform {
    async fn search_tracks(&self, query: &str, _limit: u32) -> Result<Vec<Track>> {
        self.enter("tracks")?;
        Ok(self.tracks(query))
    }

    async fn search_artists(&self, query: &str, _limit: u32) -> Result<Vec<Artist>> {
        self.enter("artists")?;
        Ok(self.artists(query))
    }

    async fn search_albums(&self, query: &str, _limit: u32) -> Result<Vec<Album>> {
        self.enter("albums")?;
        Ok(self.albums(query))
    }

    async fn recommendations(&self, seeds: &RecommendationSeeds, limit: u32) -> Result<Vec<Track>> {
        self.enter("recommendations")?;
        if seeds.is_empty() {
            return Err(PlatformError::Status {
                platform: self.platform,
                status: 400,
                body: "invalid request".to_string(),
            });
        }
        let mut tracks = self.tracks("recommended");
        tracks.truncate(limit as usize);
        Ok(tracks)
    }
}

#[async_trait]
impl VideoPlatform for MockPlatform {
    async fn search_videos(&self, query: &str, _limit: u32) -> Result<Vec<Video>> {
        self.enter("videos")?;
        Ok((0..self.size)
            .map(|i| Video::new(self.platform, format!("{} video {}", query, i), self.url("watch", i)))
            .collect())
    }

    async fn search_playlists(&self, query: &str, _limit: u32) -> Result<Vec<Playlist>> {
        self.enter("playlists")?;
        Ok((0..self.size)
            .map(|i| Playlist::new(self.platform, format!("{} playlist {}", query, i), self.url("playlist", i)))
            .collect())
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<Video>> {
        self.enter("video_details")?;
        Ok((video_id == "known").then(|| Video::new(self.platform, "Known video", self.url("watch", 0))))
    }
}

#[async_trait]
impl ScrobblePlatform for MockPlatform {
    async fn search_tracks(&self, query: &str, _limit: u32) -> Result<Vec<Track>> {
        self.enter("tracks")?;
        Ok(self.tracks(query))
    }

    async fn search_artists(&self, query: &str, _limit: u32) -> Result<Vec<Artist>> {
        self.enter("artists")?;
        Ok(self.artists(query))
    }

    async fn search_albums(&self, query: &str, _limit: u32) -> Result<Vec<Album>> {
        self.enter("albums")?;
        Ok(self.albums(query))
    }

    async fn similar_tracks(&self, artist: &str, track: &str, _limit: u32) -> Result<Vec<Track>> {
        self.enter("similar")?;
        Ok(self.tracks(&format!("{} {}", artist, track)))
    }

    async fn top_tracks(&self, _limit: u32) -> Result<Vec<Track>> {
        self.enter("top")?;
        Ok(self.tracks("top"))
    }
}

/// Handles to the fakes wired into a `MusicServices`.
pub struct Fakes {
    pub spotify: Option<Arc<MockPlatform>>,
    pub youtube: Option<Arc<MockPlatform>>,
    pub lastfm: Option<Arc<MockPlatform>>,
}

impl Fakes {
    /// Healthy fakes for every platform listed, `size` records per call.
    pub fn healthy(platforms: &[Platform], size: usize) -> Self {
        let make = |p: Platform| platforms.contains(&p).then(|| Arc::new(MockPlatform::healthy(p, size)));
        Self {
            spotify: make(Platform::Spotify),
            youtube: make(Platform::YouTube),
            lastfm: make(Platform::Lastfm),
        }
    }

    pub fn services(&self) -> Arc<MusicServices> {
        Arc::new(MusicServices::new(
            self.spotify.clone().map(|m| m as Arc<dyn CatalogPlatform>),
            self.youtube.clone().map(|m| m as Arc<dyn VideoPlatform>),
            self.lastfm.clone().map(|m| m as Arc<dyn ScrobblePlatform>),
        ))
    }
}
