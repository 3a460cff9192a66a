//! Availability gate.
//!
//! Decides, once at startup, which platforms have usable credentials. A
//! platform is available iff every one of its required secrets is present
//! and non-empty. No network call is made here; bad credentials surface on
//! the first real request.

use serde::Serialize;
use tracing::{error, info, warn};

use super::model::Platform;
use crate::core::config::CredentialsConfig;

/// A named credential slot and its configured value.
#[derive(Debug, Clone, Copy)]
pub struct CredentialSlot<'a> {
    /// Environment variable name of the slot.
    pub name: &'static str,
    /// The configured value, if any.
    pub value: Option<&'a str>,
}

impl CredentialSlot<'_> {
    fn is_filled(&self) -> bool {
        self.value.is_some_and(|v| !v.trim().is_empty())
    }
}

/// Required credential slots for a platform.
pub fn required_slots(platform: Platform, credentials: &CredentialsConfig) -> Vec<CredentialSlot<'_>> {
    match platform {
        Platform::Spotify => vec![
            CredentialSlot {
                name: "SPOTIFY_CLIENT_ID",
                value: credentials.spotify_client_id.as_deref(),
            },
            CredentialSlot {
                name: "SPOTIFY_CLIENT_SECRET",
                value: credentials.spotify_client_secret.as_deref(),
            },
        ],
        Platform::YouTube => vec![CredentialSlot {
            name: "YOUTUBE_API_KEY",
            value: credentials.youtube_api_key.as_deref(),
        }],
        Platform::Lastfm => vec![CredentialSlot {
            name: "LASTFM_API_KEY",
            value: credentials.lastfm_api_key.as_deref(),
        }],
    }
}

/// Names of the required credentials that are missing for a platform.
pub fn missing_credentials(platform: Platform, credentials: &CredentialsConfig) -> Vec<&'static str> {
    required_slots(platform, credentials)
        .into_iter()
        .filter(|slot| !slot.is_filled())
        .map(|slot| slot.name)
        .collect()
}

/// Process-wide platform availability flags.
///
/// Computed once; immutable afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub spotify: bool,
    pub youtube: bool,
    pub lastfm: bool,
}

impl Availability {
    /// Evaluate the configured credentials, logging the result per platform.
    pub fn from_credentials(credentials: &CredentialsConfig) -> Self {
        let mut availability = Self::default();

        for platform in Platform::ALL {
            let missing = missing_credentials(platform, credentials);
            if missing.is_empty() {
                info!("{} credentials found", platform.as_str().to_uppercase());
                availability.set(platform, true);
            } else {
                warn!(
                    "{} service will be disabled. Missing: {}",
                    platform.as_str().to_uppercase(),
                    missing.join(", ")
                );
            }
        }

        let available = availability.available_platforms();
        if available.is_empty() {
            error!("No music services configured! Please set up your API credentials");
        } else {
            let names: Vec<_> = available.iter().map(|p| p.as_str()).collect();
            info!("Available services: {}", names.join(", "));
        }

        availability
    }

    /// Whether the given platform is available.
    pub fn is_available(&self, platform: Platform) -> bool {
        match platform {
            Platform::Spotify => self.spotify,
            Platform::YouTube => self.youtube,
            Platform::Lastfm => self.lastfm,
        }
    }

    /// All available platforms, in envelope order.
    pub fn available_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.is_available(*p))
            .collect()
    }

    fn set(&mut self, platform: Platform, value: bool) {
        match platform {
            Platform::Spotify => self.spotify = value,
            Platform::YouTube => self.youtube = value,
            Platform::Lastfm => self.lastfm = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_credentials() -> CredentialsConfig {
        CredentialsConfig {
            spotify_client_id: Some("id".to_string()),
            spotify_client_secret: Some("secret".to_string()),
            spotify_redirect_uri: None,
            youtube_api_key: Some("yt".to_string()),
            lastfm_api_key: Some("lfm".to_string()),
        }
    }

    #[test]
    fn test_all_available() {
        let availability = Availability::from_credentials(&full_credentials());
        assert!(availability.spotify);
        assert!(availability.youtube);
        assert!(availability.lastfm);
        assert_eq!(availability.available_platforms(), Platform::ALL.to_vec());
    }

    #[test]
    fn test_nothing_configured() {
        let availability = Availability::from_credentials(&CredentialsConfig::default());
        assert_eq!(availability, Availability::default());
        assert!(availability.available_platforms().is_empty());
    }

    #[test]
    fn test_spotify_requires_every_secret() {
        let mut credentials = full_credentials();
        credentials.spotify_client_secret = None;

        let availability = Availability::from_credentials(&credentials);
        assert!(!availability.is_available(Platform::Spotify));
        assert!(availability.is_available(Platform::YouTube));
        assert_eq!(
            missing_credentials(Platform::Spotify, &credentials),
            vec!["SPOTIFY_CLIENT_SECRET"]
        );
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let mut credentials = full_credentials();
        credentials.lastfm_api_key = Some("   ".to_string());
        credentials.youtube_api_key = Some(String::new());

        let availability = Availability::from_credentials(&credentials);
        assert!(!availability.lastfm);
        assert!(!availability.youtube);
        assert!(availability.spotify);
    }

    #[test]
    fn test_redirect_uri_is_optional() {
        let credentials = full_credentials();
        assert!(credentials.spotify_redirect_uri.is_none());
        assert!(missing_credentials(Platform::Spotify, &credentials).is_empty());
    }
}
