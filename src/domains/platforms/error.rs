//! Platform-specific error types.

use thiserror::Error;

use super::model::Platform;

/// A specialized Result type for platform client operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Errors that can occur while talking to an upstream music platform.
///
/// Every variant is a value, not a fault: clients return these so the
/// caller decides whether to absorb them (fan-out) or surface them
/// (single-platform calls).
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The HTTP request could not be sent or the connection failed.
    #[error("{platform} request failed: {source}")]
    Transport {
        platform: Platform,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status code.
    #[error("{platform} API error ({status}): {body}")]
    Status {
        platform: Platform,
        status: u16,
        body: String,
    },

    /// The upstream payload could not be decoded.
    #[error("{platform} returned a malformed payload: {message}")]
    Decode { platform: Platform, message: String },

    /// The upstream reported an error inside a successful response.
    #[error("{platform} API error: {message}")]
    Api { platform: Platform, message: String },

    /// Obtaining an access token failed.
    #[error("{platform} authentication failed: {message}")]
    Auth { platform: Platform, message: String },

    /// The platform has no credentials configured.
    #[error("{0} service unavailable")]
    NotConfigured(Platform),
}

impl PlatformError {
    /// Create a transport error.
    pub fn transport(platform: Platform, source: reqwest::Error) -> Self {
        Self::Transport { platform, source }
    }

    /// Create a decode error.
    pub fn decode(platform: Platform, message: impl Into<String>) -> Self {
        Self::Decode {
            platform,
            message: message.into(),
        }
    }

    /// Create an in-band API error.
    pub fn api(platform: Platform, message: impl Into<String>) -> Self {
        Self::Api {
            platform,
            message: message.into(),
        }
    }

    /// Create an authentication error.
    pub fn auth(platform: Platform, message: impl Into<String>) -> Self {
        Self::Auth {
            platform,
            message: message.into(),
        }
    }

    /// The platform this error originated from.
    pub fn platform(&self) -> Platform {
        match self {
            Self::Transport { platform, .. }
            | Self::Status { platform, .. }
            | Self::Decode { platform, .. }
            | Self::Api { platform, .. }
            | Self::Auth { platform, .. } => *platform,
            Self::NotConfigured(platform) => *platform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = PlatformError::Status {
            platform: Platform::Lastfm,
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Last.fm API error (503): unavailable");
        assert_eq!(err.platform(), Platform::Lastfm);
    }

    #[test]
    fn test_not_configured_message() {
        let err = PlatformError::NotConfigured(Platform::Spotify);
        assert_eq!(err.to_string(), "Spotify service unavailable");
    }
}
