//! Response envelopes returned by the aggregator.
//!
//! Field order in these structs is the serialized key order.

use serde::Serialize;

use crate::domains::platforms::{Album, Artist, Playlist, Track, Video};

/// Outcome status of an aggregated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Spotify section of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpotifySection {
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
}

/// YouTube section of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YouTubeSection {
    pub videos: Vec<Video>,
    pub playlists: Vec<Playlist>,
}

/// Last.fm section of the envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LastfmSection {
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
}

/// All platform sections, always present together on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlatformSections {
    pub spotify: SpotifySection,
    pub youtube: YouTubeSection,
    pub lastfm: LastfmSection,
}

/// Merged result of a cross-platform search.
///
/// On success: `{query, spotify, youtube, lastfm, status}`.
/// On failure: `{query, status: "error", message}` with no partial data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedResponse {
    pub query: String,
    #[serde(flatten)]
    pub platforms: Option<PlatformSections>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AggregatedResponse {
    pub fn success(query: impl Into<String>, platforms: PlatformSections) -> Self {
        Self {
            query: query.into(),
            platforms: Some(platforms),
            status: Status::Success,
            message: None,
        }
    }

    pub fn error(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            platforms: None,
            status: Status::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

/// Result of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Track>>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationResponse {
    pub fn success(recommendations: Vec<Track>) -> Self {
        Self {
            recommendations: Some(recommendations),
            status: Status::Success,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            recommendations: None,
            status: Status::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}
