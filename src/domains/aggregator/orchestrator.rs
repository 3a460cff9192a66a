//! Cross-platform fan-out.
//!
//! `search_all` runs every search operation of every configured platform
//! concurrently on the calling task. Each branch is isolated: an error or a
//! panic in one branch becomes an empty list in the merged envelope and
//! never affects its siblings.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, info, instrument, warn};

use super::envelope::{
    AggregatedResponse, LastfmSection, PlatformSections, RecommendationResponse, SpotifySection,
    YouTubeSection,
};
use super::error::AggregationError;
use crate::domains::platforms::error::Result as PlatformResult;
use crate::domains::platforms::{
    MusicServices, Platform, PlatformError, RecommendationSeeds, Track,
};

/// Largest per-category limit; larger requests are clamped.
pub const MAX_LIMIT: u32 = 50;

/// Default per-category limit for cross-platform search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Default number of recommendations.
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 10;

/// What happened to one (platform, category) branch of a fan-out.
#[derive(Debug)]
pub enum BranchOutcome<T> {
    Completed(Vec<T>),
    /// The platform has no client; the branch was never launched.
    Unavailable,
    Failed(String),
}

impl<T> BranchOutcome<T> {
    /// Records to merge: at most `limit`, empty unless completed.
    pub fn into_records(self, limit: usize) -> Vec<T> {
        match self {
            Self::Completed(mut records) => {
                records.truncate(limit);
                records
            }
            Self::Unavailable | Self::Failed(_) => Vec::new(),
        }
    }
}

/// Await one branch, converting errors and panics into `Failed`.
async fn run_branch<T, F>(platform: Platform, category: &'static str, call: Option<F>) -> BranchOutcome<T>
where
    F: Future<Output = PlatformResult<Vec<T>>>,
{
    let Some(call) = call else {
        debug!(platform = platform.as_str(), category, "Skipping unavailable platform");
        return BranchOutcome::Unavailable;
    };

    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(records)) => {
            debug!(platform = platform.as_str(), category, count = records.len(), "Branch completed");
            BranchOutcome::Completed(records)
        }
        Ok(Err(e)) => {
            warn!(platform = platform.as_str(), category, "Search failed: {}", e);
            BranchOutcome::Failed(e.to_string())
        }
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            error!(platform = platform.as_str(), category, "Search panicked: {}", message);
            BranchOutcome::Failed(message)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Validate a query and limit, returning the trimmed query and the
/// clamped limit.
pub fn validate_request(query: &str, limit: u32) -> Result<(&str, u32), AggregationError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AggregationError::EmptyQuery);
    }
    if limit == 0 {
        return Err(AggregationError::InvalidLimit);
    }
    Ok((query, limit.min(MAX_LIMIT)))
}

/// Fan-out search and recommendation entry point.
#[derive(Debug, Clone)]
pub struct Aggregator {
    services: Arc<MusicServices>,
}

impl Aggregator {
    pub fn new(services: Arc<MusicServices>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &Arc<MusicServices> {
        &self.services
    }

    /// Search every configured platform and merge the results.
    #[instrument(skip(self))]
    pub async fn search_all(&self, query: &str, limit: u32) -> AggregatedResponse {
        match validate_request(query, limit) {
            Ok((trimmed, limit)) => {
                let sections = self.fan_out(trimmed, limit).await;
                info!("Cross-platform search for '{}' completed", trimmed);
                AggregatedResponse::success(query, sections)
            }
            Err(e) => {
                warn!("Rejected cross-platform search: {}", e);
                AggregatedResponse::error(query, e.to_string())
            }
        }
    }

    async fn fan_out(&self, query: &str, limit: u32) -> PlatformSections {
        let spotify = self.services.spotify();
        let youtube = self.services.youtube();
        let lastfm = self.services.lastfm();

        let (
            spotify_tracks,
            spotify_artists,
            spotify_albums,
            youtube_videos,
            youtube_playlists,
            lastfm_tracks,
            lastfm_artists,
            lastfm_albums,
        ) = tokio::join!(
            run_branch(Platform::Spotify, "tracks", spotify.map(|c| c.search_tracks(query, limit))),
            run_branch(Platform::Spotify, "artists", spotify.map(|c| c.search_artists(query, limit))),
            run_branch(Platform::Spotify, "albums", spotify.map(|c| c.search_albums(query, limit))),
            run_branch(Platform::YouTube, "videos", youtube.map(|c| c.search_videos(query, limit))),
            run_branch(Platform::YouTube, "playlists", youtube.map(|c| c.search_playlists(query, limit))),
            run_branch(Platform::Lastfm, "tracks", lastfm.map(|c| c.search_tracks(query, limit))),
            run_branch(Platform::Lastfm, "artists", lastfm.map(|c| c.search_artists(query, limit))),
            run_branch(Platform::Lastfm, "albums", lastfm.map(|c| c.search_albums(query, limit))),
        );

        let limit = limit as usize;
        PlatformSections {
            spotify: SpotifySection {
                tracks: spotify_tracks.into_records(limit),
                artists: spotify_artists.into_records(limit),
                albums: spotify_albums.into_records(limit),
            },
            youtube: YouTubeSection {
                videos: youtube_videos.into_records(limit),
                playlists: youtube_playlists.into_records(limit),
            },
            lastfm: LastfmSection {
                tracks: lastfm_tracks.into_records(limit),
                artists: lastfm_artists.into_records(limit),
                albums: lastfm_albums.into_records(limit),
            },
        }
    }

    /// Seeded recommendations from Spotify.
    #[instrument(skip(self))]
    pub async fn get_recommendations(&self, seeds: &RecommendationSeeds, limit: u32) -> RecommendationResponse {
        match self.try_recommendations(seeds, limit).await {
            Ok(tracks) => {
                info!("Returning {} recommendations", tracks.len());
                RecommendationResponse::success(tracks)
            }
            Err(e) => {
                warn!("Recommendations failed: {}", e);
                RecommendationResponse::error(e.to_string())
            }
        }
    }

    async fn try_recommendations(
        &self,
        seeds: &RecommendationSeeds,
        limit: u32,
    ) -> Result<Vec<Track>, AggregationError> {
        if limit == 0 {
            return Err(AggregationError::InvalidLimit);
        }
        let spotify = self
            .services
            .spotify()
            .ok_or(PlatformError::NotConfigured(Platform::Spotify))?;

        let mut tracks = spotify.recommendations(seeds, limit.min(MAX_LIMIT)).await?;
        tracks.truncate(limit as usize);
        Ok(tracks)
    }
}
