//! Normalized record types shared by every platform.
//!
//! Each upstream speaks its own JSON dialect; clients translate those
//! payloads into the records defined here. A record always carries a
//! display name and a canonical URL back to its source platform. Upstream
//! items missing either are dropped during conversion (see [`identity`]).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One of the supported upstream music platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Streaming catalog (tracks, artists, albums, recommendations).
    Spotify,
    /// Video platform (music videos, playlists).
    #[serde(rename = "youtube")]
    YouTube,
    /// Scrobbling and charts service (tracks, artists, albums, charts).
    Lastfm,
}

impl Platform {
    /// All platforms, in envelope order.
    pub const ALL: [Platform; 3] = [Platform::Spotify, Platform::YouTube, Platform::Lastfm];

    /// Machine-readable key used in envelopes and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spotify => "spotify",
            Self::YouTube => "youtube",
            Self::Lastfm => "lastfm",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::YouTube => "YouTube",
            Self::Lastfm => "Last.fm",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A normalized track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listeners: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playcount: Option<u64>,
    /// Similarity score (0.0 - 1.0) for similar-track lookups.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbid: Option<String>,
    pub source: Platform,
}

impl Track {
    /// Create a track with only its required fields set.
    pub fn new(source: Platform, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            artist: None,
            album: None,
            url: url.into(),
            image: None,
            duration_ms: None,
            popularity: None,
            listeners: None,
            playcount: None,
            match_score: None,
            preview_url: None,
            release_date: None,
            mbid: None,
            source,
        }
    }
}

/// A normalized artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listeners: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbid: Option<String>,
    pub source: Platform,
}

impl Artist {
    /// Create an artist with only its required fields set.
    pub fn new(source: Platform, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            url: url.into(),
            image: None,
            popularity: None,
            followers: None,
            listeners: None,
            genres: Vec::new(),
            mbid: None,
            source,
        }
    }
}

/// A normalized album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tracks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbid: Option<String>,
    pub source: Platform,
}

impl Album {
    /// Create an album with only its required fields set.
    pub fn new(source: Platform, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            artist: None,
            url: url.into(),
            image: None,
            release_date: None,
            total_tracks: None,
            album_type: None,
            mbid: None,
            source,
        }
    }
}

/// A normalized video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// ISO 8601 duration (only present on detail lookups).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    pub source: Platform,
}

impl Video {
    /// Create a video with only its required fields set.
    pub fn new(source: Platform, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            channel: None,
            url: url.into(),
            image: None,
            description: None,
            published_at: None,
            duration: None,
            view_count: None,
            like_count: None,
            source,
        }
    }
}

/// A normalized playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub source: Platform,
}

impl Playlist {
    /// Create a playlist with only its required fields set.
    pub fn new(source: Platform, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            channel: None,
            url: url.into(),
            image: None,
            description: None,
            published_at: None,
            source,
        }
    }
}

/// Trim a string and discard it when nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the display name and canonical URL of an upstream item.
///
/// Returns `None` (and logs at debug level) when either is missing or
/// blank; such items are malformed and must not be surfaced.
pub fn identity(
    platform: Platform,
    kind: &str,
    name: Option<String>,
    url: Option<String>,
) -> Option<(String, String)> {
    match (non_blank(name), non_blank(url)) {
        (Some(name), Some(url)) => Some((name, url)),
        (name, url) => {
            debug!(
                platform = platform.as_str(),
                kind,
                has_name = name.is_some(),
                has_url = url.is_some(),
                "Dropping malformed record"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_keys() {
        assert_eq!(Platform::Spotify.as_str(), "spotify");
        assert_eq!(Platform::YouTube.as_str(), "youtube");
        assert_eq!(Platform::Lastfm.as_str(), "lastfm");
        assert_eq!(
            serde_json::to_value(Platform::YouTube).unwrap(),
            serde_json::json!("youtube")
        );
    }

    #[test]
    fn test_identity_requires_name_and_url() {
        assert_eq!(
            identity(
                Platform::Spotify,
                "track",
                Some(" So What ".to_string()),
                Some("https://open.spotify.com/track/1".to_string())
            ),
            Some((
                "So What".to_string(),
                "https://open.spotify.com/track/1".to_string()
            ))
        );
        assert!(identity(Platform::Spotify, "track", Some("So What".into()), None).is_none());
        assert!(identity(Platform::Spotify, "track", None, Some("https://x".into())).is_none());
        assert!(
            identity(Platform::Spotify, "track", Some("   ".into()), Some("https://x".into()))
                .is_none()
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let track = Track::new(Platform::Lastfm, "Blue in Green", "https://last.fm/x");
        let value = serde_json::to_value(&track).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert_eq!(object["name"], "Blue in Green");
        assert_eq!(object["url"], "https://last.fm/x");
        assert_eq!(object["source"], "lastfm");
    }

    #[test]
    fn test_match_score_serializes_as_match() {
        let mut track = Track::new(Platform::Lastfm, "Naima", "https://last.fm/naima");
        track.match_score = Some(0.75);
        let value = serde_json::to_value(&track).unwrap();
        assert_eq!(value["match"], 0.75);
    }
}
