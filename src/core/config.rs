//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Platform API credentials.
    pub credentials: CredentialsConfig,

    /// Upstream endpoints and HTTP client settings.
    pub platforms: PlatformsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Credentials for the upstream music platforms.
///
/// A platform is enabled only when all of its required values are present
/// and non-empty (see `domains::platforms::Availability`).
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Spotify application client ID.
    pub spotify_client_id: Option<String>,

    /// Spotify application client secret.
    pub spotify_client_secret: Option<String>,

    /// Spotify redirect URI (informational; not used by the client-credentials grant).
    pub spotify_redirect_uri: Option<String>,

    /// YouTube Data API v3 key.
    pub youtube_api_key: Option<String>,

    /// Last.fm API key.
    pub lastfm_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("CredentialsConfig")
            .field("spotify_client_id", &redact(&self.spotify_client_id))
            .field("spotify_client_secret", &redact(&self.spotify_client_secret))
            .field("spotify_redirect_uri", &self.spotify_redirect_uri)
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .field("lastfm_api_key", &redact(&self.lastfm_api_key))
            .finish()
    }
}

/// Upstream endpoint configuration.
///
/// The defaults point at the public APIs; overriding them is mostly useful
/// for pointing the clients at a local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformsConfig {
    /// Spotify Web API base URL.
    pub spotify_api_url: String,

    /// Spotify accounts token endpoint.
    pub spotify_token_url: String,

    /// YouTube Data API base URL.
    pub youtube_api_url: String,

    /// Last.fm API endpoint.
    pub lastfm_api_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl PlatformsConfig {
    /// Per-request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for PlatformsConfig {
    fn default() -> Self {
        Self {
            spotify_api_url: "https://api.spotify.com/v1".to_string(),
            spotify_token_url: "https://accounts.spotify.com/api/token".to_string(),
            youtube_api_url: "https://www.googleapis.com/youtube/v3".to_string(),
            lastfm_api_url: "https://ws.audioscrobbler.com/2.0/".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "music-discovery-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            platforms: PlatformsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_REQUEST_TIMEOUT_SECS`). Platform credentials use
    /// the platforms' conventional names: `SPOTIFY_CLIENT_ID`,
    /// `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_REDIRECT_URI`, `YOUTUBE_API_KEY`,
    /// `LASTFM_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.credentials = CredentialsConfig {
            spotify_client_id: std::env::var("SPOTIFY_CLIENT_ID").ok(),
            spotify_client_secret: std::env::var("SPOTIFY_CLIENT_SECRET").ok(),
            spotify_redirect_uri: std::env::var("SPOTIFY_REDIRECT_URI").ok(),
            youtube_api_key: std::env::var("YOUTUBE_API_KEY").ok(),
            lastfm_api_key: std::env::var("LASTFM_API_KEY").ok(),
        };

        if let Ok(url) = std::env::var("SPOTIFY_API_URL") {
            config.platforms.spotify_api_url = url;
        }
        if let Ok(url) = std::env::var("SPOTIFY_TOKEN_URL") {
            config.platforms.spotify_token_url = url;
        }
        if let Ok(url) = std::env::var("YOUTUBE_API_URL") {
            config.platforms.youtube_api_url = url;
        }
        if let Ok(url) = std::env::var("LASTFM_API_URL") {
            config.platforms.lastfm_api_url = url;
        }

        if let Some(secs) = std::env::var("MCP_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.platforms.request_timeout_secs = secs;
            info!("Upstream request timeout set to {}s", secs);
        }

        config
    }
}
