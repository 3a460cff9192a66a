//! Last.fm API client.
//!
//! Every Last.fm call is a GET on the same endpoint with a `method`
//! parameter. Errors may come back with a 200 status and an
//! `{"error": code, "message": ...}` body, which is mapped to
//! [`PlatformError::Api`].

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use super::error::{PlatformError, Result};
use super::model::{Album, Artist, Platform, Track, identity, non_blank};
use super::traits::ScrobblePlatform;
use super::upstream::{fetch_json, lenient_f64, lenient_u64, null_as_default};

const PLATFORM: Platform = Platform::Lastfm;

/// Last.fm client.
pub struct LastfmClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl LastfmClient {
    /// Create a new Last.fm client.
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Call a Last.fm method and unwrap its in-band error envelope.
    async fn call<T>(&self, method: &str, params: &[(&str, &str)], limit: u32) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let limit = limit.to_string();
        let request = self
            .http
            .get(&self.api_url)
            .query(&[
                ("method", method),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
            ])
            .query(params);

        match fetch_json::<Envelope<T>>(PLATFORM, request).await? {
            Envelope::Ok(body) => Ok(body),
            Envelope::Error { error, message } => Err(PlatformError::api(
                PLATFORM,
                format!("{} (code {})", message, error),
            )),
        }
    }
}

#[async_trait]
impl ScrobblePlatform for LastfmClient {
    #[instrument(skip(self))]
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let body: TrackSearch = self.call("track.search", &[("track", query)], limit).await?;
        Ok(normalize(body.results.matches.track, limit, RawTrack::into_track))
    }

    #[instrument(skip(self))]
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let body: ArtistSearch = self.call("artist.search", &[("artist", query)], limit).await?;
        Ok(normalize(body.results.matches.artist, limit, RawArtist::into_artist))
    }

    #[instrument(skip(self))]
    async fn search_albums(&self, query: &str, limit: u32) -> Result<Vec<Album>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let body: AlbumSearch = self.call("album.search", &[("album", query)], limit).await?;
        Ok(normalize(body.results.matches.album, limit, RawAlbum::into_album))
    }

    #[instrument(skip(self))]
    async fn similar_tracks(&self, artist: &str, track: &str, limit: u32) -> Result<Vec<Track>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let body: SimilarTracks = self
            .call("track.getsimilar", &[("artist", artist), ("track", track)], limit)
            .await?;
        Ok(normalize(body.similartracks.track, limit, RawTrack::into_track))
    }

    #[instrument(skip(self))]
    async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let body: TopTracks = self.call("chart.gettoptracks", &[], limit).await?;
        Ok(normalize(body.tracks.track, limit, RawTrack::into_track))
    }
}

fn normalize<R, T>(items: Vec<R>, limit: u32, convert: fn(R) -> Option<T>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(convert)
        .take(limit as usize)
        .collect()
}

// ============================================================================
// Upstream payloads
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Error { error: u32, message: String },
    Ok(T),
}

#[derive(Deserialize)]
struct TrackSearch {
    results: SearchResults<TrackMatches>,
}

#[derive(Deserialize)]
struct ArtistSearch {
    results: SearchResults<ArtistMatches>,
}

#[derive(Deserialize)]
struct AlbumSearch {
    results: SearchResults<AlbumMatches>,
}

#[derive(Deserialize)]
struct SearchResults<M> {
    #[serde(
        alias = "trackmatches",
        alias = "artistmatches",
        alias = "albummatches"
    )]
    matches: M,
}

#[derive(Deserialize)]
struct TrackMatches {
    #[serde(default, deserialize_with = "one_or_many")]
    track: Vec<RawTrack>,
}

#[derive(Deserialize)]
struct ArtistMatches {
    #[serde(default, deserialize_with = "one_or_many")]
    artist: Vec<RawArtist>,
}

#[derive(Deserialize)]
struct AlbumMatches {
    #[serde(default, deserialize_with = "one_or_many")]
    album: Vec<RawAlbum>,
}

#[derive(Deserialize)]
struct SimilarTracks {
    similartracks: TrackList,
}

#[derive(Deserialize)]
struct TopTracks {
    tracks: TrackList,
}

#[derive(Deserialize)]
struct TrackList {
    #[serde(default, deserialize_with = "one_or_many")]
    track: Vec<RawTrack>,
}

/// Last.fm collapses single-element lists into a bare object.
fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    let value: Option<OneOrMany<T>> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

/// Artist reference: a plain name in search results, an object elsewhere.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArtistRef {
    Name(String),
    Object { name: Option<String> },
}

impl ArtistRef {
    fn into_name(self) -> Option<String> {
        match self {
            Self::Name(name) => non_blank(Some(name)),
            Self::Object { name } => non_blank(name),
        }
    }
}

#[derive(Deserialize)]
struct RawImage {
    #[serde(rename = "#text")]
    url: Option<String>,
    size: Option<String>,
}

fn size_rank(size: Option<&str>) -> u8 {
    match size {
        Some("small") => 1,
        Some("medium") => 2,
        Some("large") => 3,
        Some("extralarge") => 4,
        Some("mega") => 5,
        _ => 0,
    }
}

/// Largest image with a non-empty URL.
fn best_image(images: Vec<RawImage>) -> Option<String> {
    images
        .into_iter()
        .filter_map(|image| {
            let rank = size_rank(image.size.as_deref());
            non_blank(image.url).map(|url| (rank, url))
        })
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, url)| url)
}

#[derive(Deserialize)]
struct RawTrack {
    name: Option<String>,
    artist: Option<ArtistRef>,
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    listeners: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    playcount: Option<u64>,
    #[serde(rename = "match", default, deserialize_with = "lenient_f64")]
    match_score: Option<f64>,
    /// Seconds.
    #[serde(default, deserialize_with = "lenient_u64")]
    duration: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    image: Vec<RawImage>,
    mbid: Option<String>,
}

#[derive(Deserialize)]
struct RawArtist {
    name: Option<String>,
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    listeners: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    image: Vec<RawImage>,
    mbid: Option<String>,
}

#[derive(Deserialize)]
struct RawAlbum {
    name: Option<String>,
    artist: Option<ArtistRef>,
    url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    image: Vec<RawImage>,
    mbid: Option<String>,
}

impl RawTrack {
    fn into_track(self) -> Option<Track> {
        let (name, url) = identity(PLATFORM, "track", self.name, self.url)?;

        let mut track = Track::new(PLATFORM, name, url);
        track.artist = self.artist.and_then(ArtistRef::into_name);
        track.listeners = self.listeners;
        track.playcount = self.playcount;
        track.match_score = self.match_score;
        track.duration_ms = self
            .duration
            .filter(|d| *d > 0)
            .and_then(|d| d.checked_mul(1000));
        track.image = best_image(self.image);
        track.mbid = non_blank(self.mbid);
        Some(track)
    }
}

impl RawArtist {
    fn into_artist(self) -> Option<Artist> {
        let (name, url) = identity(PLATFORM, "artist", self.name, self.url)?;

        let mut artist = Artist::new(PLATFORM, name, url);
        artist.listeners = self.listeners;
        artist.image = best_image(self.image);
        artist.mbid = non_blank(self.mbid);
        Some(artist)
    }
}

impl RawAlbum {
    fn into_album(self) -> Option<Album> {
        let (name, url) = identity(PLATFORM, "album", self.name, self.url)?;

        let mut album = Album::new(PLATFORM, name, url);
        album.artist = self.artist.and_then(ArtistRef::into_name);
        album.image = best_image(self.image);
        album.mbid = non_blank(self.mbid);
        Some(album)
    }
}
