//! Spotify Web API client.
//!
//! Authenticates with the client-credentials grant and caches the access
//! token until shortly before it expires. Search and recommendation
//! payloads are normalized into [`Track`], [`Artist`] and [`Album`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::error::{PlatformError, Result};
use super::model::{Album, Artist, Platform, Track, identity, non_blank};
use super::traits::{CatalogPlatform, RecommendationSeeds};
use super::upstream::{fetch_json, join_url, lenient_u32, lenient_u64, null_as_default};

const PLATFORM: Platform = Platform::Spotify;

/// Largest page size accepted by the search and recommendation endpoints.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Refresh the token this long before Spotify says it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on the lifetime taken from a token response.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Spotify catalog client.
pub struct SpotifyClient {
    http: reqwest::Client,
    api_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<AccessToken>>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

impl SpotifyClient {
    /// Create a new Spotify client.
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: RwLock::new(None),
        }
    }

    /// Return a valid access token, exchanging credentials when needed.
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.token.write().await;
        // Another request may have refreshed it while we waited.
        if let Some(token) = cached.as_ref() {
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken> {
        debug!("Requesting Spotify access token");

        let credentials = format!("{}:{}", self.client_id, self.client_secret);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);

        let request = self
            .http
            .post(&self.token_url)
            .header("Authorization", format!("Basic {}", encoded))
            .form(&[("grant_type", "client_credentials")]);

        let response: TokenResponse = fetch_json(PLATFORM, request)
            .await
            .map_err(|e| PlatformError::auth(PLATFORM, e.to_string()))?;

        info!("Spotify access token acquired");
        let lifetime = Duration::from_secs(response.expires_in).min(MAX_TOKEN_LIFETIME);
        Ok(AccessToken {
            value: response.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    async fn search(&self, query: &str, kind: &str, limit: u32) -> Result<SearchResponse> {
        let token = self.access_token().await?;
        let limit = limit.min(MAX_PAGE_SIZE).to_string();
        let request = self
            .http
            .get(join_url(&self.api_url, "search"))
            .bearer_auth(token)
            .query(&[("q", query), ("type", kind), ("limit", limit.as_str())]);
        fetch_json(PLATFORM, request).await
    }
}

#[async_trait]
impl CatalogPlatform for SpotifyClient {
    #[instrument(skip(self))]
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let page = self
            .search(query, "track", limit)
            .await?
            .tracks
            .ok_or_else(|| PlatformError::decode(PLATFORM, "missing 'tracks' section"))?;

        Ok(normalize(page.items, limit, RawTrack::into_track))
    }

    #[instrument(skip(self))]
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let page = self
            .search(query, "artist", limit)
            .await?
            .artists
            .ok_or_else(|| PlatformError::decode(PLATFORM, "missing 'artists' section"))?;

        Ok(normalize(page.items, limit, RawArtist::into_artist))
    }

    #[instrument(skip(self))]
    async fn search_albums(&self, query: &str, limit: u32) -> Result<Vec<Album>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let page = self
            .search(query, "album", limit)
            .await?
            .albums
            .ok_or_else(|| PlatformError::decode(PLATFORM, "missing 'albums' section"))?;

        Ok(normalize(page.items, limit, RawAlbum::into_album))
    }

    #[instrument(skip(self))]
    async fn recommendations(&self, seeds: &RecommendationSeeds, limit: u32) -> Result<Vec<Track>> {
        let token = self.access_token().await?;

        let mut params = vec![("limit", limit.min(MAX_PAGE_SIZE).to_string())];
        if !seeds.seed_tracks.is_empty() {
            params.push(("seed_tracks", seeds.seed_tracks.join(",")));
        }
        if !seeds.seed_artists.is_empty() {
            params.push(("seed_artists", seeds.seed_artists.join(",")));
        }
        if !seeds.seed_genres.is_empty() {
            params.push(("seed_genres", seeds.seed_genres.join(",")));
        }

        let request = self
            .http
            .get(join_url(&self.api_url, "recommendations"))
            .bearer_auth(token)
            .query(&params);
        let response: RecommendationsResponse = fetch_json(PLATFORM, request).await?;

        Ok(normalize(response.tracks, limit, RawTrack::into_track))
    }
}

/// Drop null and malformed items, keep upstream order, cap at `limit`.
fn normalize<R, T>(items: Vec<Option<R>>, limit: u32, convert: fn(R) -> Option<T>) -> Vec<T> {
    items
        .into_iter()
        .flatten()
        .filter_map(convert)
        .take(limit as usize)
        .collect()
}

// ============================================================================
// Upstream payloads
// ============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Option<Page<RawTrack>>,
    artists: Option<Page<RawArtist>>,
    albums: Option<Page<RawAlbum>>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Page<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<Option<T>>,
}

#[derive(Deserialize)]
struct RecommendationsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    tracks: Vec<Option<RawTrack>>,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Deserialize)]
struct RawImage {
    url: Option<String>,
}

#[derive(Deserialize)]
struct RawArtistRef {
    name: Option<String>,
}

#[derive(Deserialize)]
struct RawAlbumRef {
    name: Option<String>,
    release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    images: Vec<RawImage>,
}

#[derive(Deserialize)]
struct RawFollowers {
    #[serde(default, deserialize_with = "lenient_u64")]
    total: Option<u64>,
}

#[derive(Deserialize)]
struct RawTrack {
    id: Option<String>,
    name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    artists: Vec<RawArtistRef>,
    album: Option<RawAlbumRef>,
    #[serde(default, deserialize_with = "lenient_u64")]
    duration_ms: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    popularity: Option<u32>,
    external_urls: Option<ExternalUrls>,
    preview_url: Option<String>,
}

#[derive(Deserialize)]
struct RawArtist {
    id: Option<String>,
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    popularity: Option<u32>,
    followers: Option<RawFollowers>,
    #[serde(default, deserialize_with = "null_as_default")]
    genres: Vec<String>,
    external_urls: Option<ExternalUrls>,
    #[serde(default, deserialize_with = "null_as_default")]
    images: Vec<RawImage>,
}

#[derive(Deserialize)]
struct RawAlbum {
    id: Option<String>,
    name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    artists: Vec<RawArtistRef>,
    release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    total_tracks: Option<u32>,
    album_type: Option<String>,
    external_urls: Option<ExternalUrls>,
    #[serde(default, deserialize_with = "null_as_default")]
    images: Vec<RawImage>,
}

fn first_artist(artists: Vec<RawArtistRef>) -> Option<String> {
    artists.into_iter().find_map(|a| non_blank(a.name))
}

fn first_image(images: Vec<RawImage>) -> Option<String> {
    images.into_iter().find_map(|i| non_blank(i.url))
}

impl RawTrack {
    fn into_track(self) -> Option<Track> {
        let url = self.external_urls.and_then(|u| u.spotify);
        let (name, url) = identity(PLATFORM, "track", self.name, url)?;

        let mut track = Track::new(PLATFORM, name, url);
        track.id = self.id;
        track.artist = first_artist(self.artists);
        track.duration_ms = self.duration_ms;
        track.popularity = self.popularity;
        track.preview_url = non_blank(self.preview_url);
        if let Some(album) = self.album {
            track.album = non_blank(album.name);
            track.release_date = non_blank(album.release_date);
            track.image = first_image(album.images);
        }
        Some(track)
    }
}

impl RawArtist {
    fn into_artist(self) -> Option<Artist> {
        let url = self.external_urls.and_then(|u| u.spotify);
        let (name, url) = identity(PLATFORM, "artist", self.name, url)?;

        let mut artist = Artist::new(PLATFORM, name, url);
        artist.id = self.id;
        artist.popularity = self.popularity;
        artist.followers = self.followers.and_then(|f| f.total);
        artist.genres = self.genres;
        artist.image = first_image(self.images);
        Some(artist)
    }
}

impl RawAlbum {
    fn into_album(self) -> Option<Album> {
        let url = self.external_urls.and_then(|u| u.spotify);
        let (name, url) = identity(PLATFORM, "album", self.name, url)?;

        let mut album = Album::new(PLATFORM, name, url);
        album.id = self.id;
        album.artist = first_artist(self.artists);
        album.release_date = non_blank(self.release_date);
        album.total_tracks = self.total_tracks;
        album.album_type = non_blank(self.album_type);
        album.image = first_image(self.images);
        Some(album)
    }
}
