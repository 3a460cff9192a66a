//! Shared HTTP plumbing for the platform clients.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use super::error::{PlatformError, Result};
use super::model::Platform;

/// Longest upstream error body kept in a `PlatformError::Status`.
const MAX_ERROR_BODY: usize = 512;

/// Build the HTTP client shared by all platform clients.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("music-discovery-mcp/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Send a request and decode its JSON body.
///
/// Transport failures, non-success status codes and malformed payloads are
/// reported as distinct `PlatformError` variants.
pub async fn fetch_json<T>(platform: Platform, request: reqwest::RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = request
        .send()
        .await
        .map_err(|e| PlatformError::transport(platform, e))?;

    let status = response.status();
    if !status.is_success() {
        let mut body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        truncate_chars(&mut body, MAX_ERROR_BODY);
        warn!(
            platform = platform.as_str(),
            status = status.as_u16(),
            "Upstream returned a non-success status"
        );
        return Err(PlatformError::Status {
            platform,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| PlatformError::transport(platform, e))?;
    debug!(platform = platform.as_str(), "Upstream response: {} bytes", bytes.len());

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(platform = platform.as_str(), "Malformed upstream payload: {}", e);
        PlatformError::decode(platform, e.to_string())
    })
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Deserialize `null` the same way as a missing field.
///
/// Use together with `#[serde(default)]` on collection fields.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize an optional count that upstreams encode either as a JSON
/// number or as a numeric string. Anything unparsable becomes `None`.
pub fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// [`lenient_u64`] narrowed to `u32`; out-of-range values become `None`.
pub fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_u64(deserializer)?.and_then(|n| u32::try_from(n).ok()))
}

/// Floating-point counterpart of [`lenient_u64`].
pub fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

fn truncate_chars(text: &mut String, max: usize) {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://api.spotify.com/v1", "/search"),
            "https://api.spotify.com/v1/search"
        );
        assert_eq!(
            join_url("https://api.spotify.com/v1/", "search"),
            "https://api.spotify.com/v1/search"
        );
    }

    #[derive(Debug, Deserialize)]
    struct Counts {
        #[serde(default, deserialize_with = "lenient_u64")]
        listeners: Option<u64>,
        #[serde(default, deserialize_with = "lenient_f64")]
        score: Option<f64>,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Narrow {
        #[serde(default, deserialize_with = "lenient_u32")]
        popularity: Option<u32>,
        #[serde(default, deserialize_with = "lenient_u64")]
        total: Option<u64>,
    }

    #[test]
    fn test_out_of_range_numbers_become_none() {
        let narrow: Narrow = serde_json::from_str(
            r#"{"popularity": 4294967296, "total": "184467440737095516160"}"#,
        )
        .unwrap();
        assert!(narrow.popularity.is_none());
        assert!(narrow.total.is_none());

        let narrow: Narrow =
            serde_json::from_str(r#"{"popularity": -1, "total": 1e300}"#).unwrap();
        assert!(narrow.popularity.is_none());
        assert!(narrow.total.is_none());

        let narrow: Narrow = serde_json::from_str(r#"{"popularity": "71"}"#).unwrap();
        assert_eq!(narrow.popularity, Some(71));
        assert!(narrow.total.is_none());
    }

    #[test]
    fn test_lenient_numbers() {
        let counts: Counts =
            serde_json::from_str(r#"{"listeners": "12345", "score": "0.5", "tags": null}"#)
                .unwrap();
        assert_eq!(counts.listeners, Some(12345));
        assert_eq!(counts.score, Some(0.5));
        assert!(counts.tags.is_empty());

        let counts: Counts =
            serde_json::from_str(r#"{"listeners": 42, "score": 1, "tags": ["jazz"]}"#).unwrap();
        assert_eq!(counts.listeners, Some(42));
        assert_eq!(counts.score, Some(1.0));
        assert_eq!(counts.tags, vec!["jazz"]);

        let counts: Counts =
            serde_json::from_str(r#"{"listeners": "lots", "score": {}}"#).unwrap();
        assert_eq!(counts.listeners, None);
        assert_eq!(counts.score, None);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        let mut text = "ééééé".to_string();
        truncate_chars(&mut text, 2);
        assert_eq!(text, "éé");

        let mut short = "ok".to_string();
        truncate_chars(&mut short, 10);
        assert_eq!(short, "ok");
    }
}
