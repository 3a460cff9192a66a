//! The set of platform clients the server runs with.

use std::sync::Arc;

use tracing::debug;

use super::availability::Availability;
use super::lastfm::LastfmClient;
use super::model::Platform;
use super::spotify::SpotifyClient;
use super::traits::{CatalogPlatform, ScrobblePlatform, VideoPlatform};
use super::upstream::build_http_client;
use super::youtube::YouTubeClient;
use crate::core::config::Config;
use crate::core::error::{Error, Result};

/// Platform clients, present only for platforms with credentials.
///
/// Built once at startup and shared read-only by the aggregator and every
/// tool. An absent client is never called.
pub struct MusicServices {
    spotify: Option<Arc<dyn CatalogPlatform>>,
    youtube: Option<Arc<dyn VideoPlatform>>,
    lastfm: Option<Arc<dyn ScrobblePlatform>>,
    availability: Availability,
}

impl MusicServices {
    /// Assemble services from already-built clients.
    pub fn new(
        spotify: Option<Arc<dyn CatalogPlatform>>,
        youtube: Option<Arc<dyn VideoPlatform>>,
        lastfm: Option<Arc<dyn ScrobblePlatform>>,
    ) -> Self {
        let availability = Availability {
            spotify: spotify.is_some(),
            youtube: youtube.is_some(),
            lastfm: lastfm.is_some(),
        };
        Self {
            spotify,
            youtube,
            lastfm,
            availability,
        }
    }

    /// A service set with no platforms at all.
    pub fn empty() -> Self {
        Self::new(None, None, None)
    }

    /// Build the HTTP clients for every platform whose credentials are set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = &config.credentials;
        let endpoints = &config.platforms;
        let availability = Availability::from_credentials(credentials);

        let http = build_http_client(endpoints.timeout())
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        let secret = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();

        let spotify: Option<Arc<dyn CatalogPlatform>> = availability.spotify.then(|| {
            debug!(api_url = %endpoints.spotify_api_url, "Initializing Spotify client");
            Arc::new(SpotifyClient::new(
                http.clone(),
                endpoints.spotify_api_url.clone(),
                endpoints.spotify_token_url.clone(),
                secret(&credentials.spotify_client_id),
                secret(&credentials.spotify_client_secret),
            )) as Arc<dyn CatalogPlatform>
        });

        let youtube: Option<Arc<dyn VideoPlatform>> = availability.youtube.then(|| {
            debug!(api_url = %endpoints.youtube_api_url, "Initializing YouTube client");
            Arc::new(YouTubeClient::new(
                http.clone(),
                endpoints.youtube_api_url.clone(),
                secret(&credentials.youtube_api_key),
            )) as Arc<dyn VideoPlatform>
        });

        let lastfm: Option<Arc<dyn ScrobblePlatform>> = availability.lastfm.then(|| {
            debug!(api_url = %endpoints.lastfm_api_url, "Initializing Last.fm client");
            Arc::new(LastfmClient::new(
                http.clone(),
                endpoints.lastfm_api_url.clone(),
                secret(&credentials.lastfm_api_key),
            )) as Arc<dyn ScrobblePlatform>
        });

        Ok(Self {
            spotify,
            youtube,
            lastfm,
            availability,
        })
    }

    pub fn spotify(&self) -> Option<&Arc<dyn CatalogPlatform>> {
        self.spotify.as_ref()
    }

    pub fn youtube(&self) -> Option<&Arc<dyn VideoPlatform>> {
        self.youtube.as_ref()
    }

    pub fn lastfm(&self) -> Option<&Arc<dyn ScrobblePlatform>> {
        self.lastfm.as_ref()
    }

    /// Availability flags matching the clients held.
    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn is_available(&self, platform: Platform) -> bool {
        self.availability.is_available(platform)
    }
}

impl std::fmt::Debug for MusicServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicServices")
            .field("availability", &self.availability)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CredentialsConfig;

    #[test]
    fn test_from_config_wires_only_configured_platforms() {
        let mut config = Config::default();
        config.credentials = CredentialsConfig {
            youtube_api_key: Some("yt".to_string()),
            lastfm_api_key: Some("  ".to_string()),
            ..CredentialsConfig::default()
        };

        let services = MusicServices::from_config(&config).unwrap();

        assert!(services.spotify().is_none());
        assert!(services.youtube().is_some());
        assert!(services.lastfm().is_none());
        assert_eq!(
            services.availability(),
            Availability {
                spotify: false,
                youtube: true,
                lastfm: false
            }
        );
    }

    #[test]
    fn test_empty_services() {
        let services = MusicServices::empty();
        assert!(services.availability().available_platforms().is_empty());
        assert!(!services.is_available(Platform::Spotify));
    }
}
