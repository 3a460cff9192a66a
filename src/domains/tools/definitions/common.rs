//! Common parameters and result helpers shared across the music tools.

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::config::CredentialsConfig;
use crate::domains::aggregator::MAX_LIMIT;
use crate::domains::platforms::availability::required_slots;
use crate::domains::platforms::{Platform, PlatformError};

/// Default limit for single-platform tools.
pub fn default_limit() -> u32 {
    10
}

/// Clamp a limit to the range accepted by every upstream (1-50).
pub fn validate_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIMIT)
}

/// Parameters for a free-text search on one platform.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search query.
    #[schemars(description = "Search query (song, artist, album or free text)")]
    pub query: String,

    #[schemars(description = "Maximum number of results (default: 10, max: 50)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Parameters for a YouTube search. `limit` is accepted as an alias.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VideoSearchParams {
    #[schemars(description = "Search query")]
    pub query: String,

    #[schemars(description = "Maximum number of results (default: 10, max: 50)")]
    #[serde(default = "default_limit", alias = "limit")]
    pub max_results: u32,
}

/// Structured output of a single-platform tool.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformResults<T> {
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> PlatformResults<T> {
    pub fn new(platform: Platform, query: Option<&str>, results: Vec<T>) -> Self {
        Self {
            platform,
            query: query.map(str::to_string),
            count: results.len(),
            results,
        }
    }
}

/// Serialize a value as pretty-printed JSON text content.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Like [`json_result`] but flagged as a tool error.
pub fn json_error_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::error(vec![Content::text(text)]),
        Err(e) => error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Error result for a platform with no credentials configured.
pub fn unavailable_result(platform: Platform) -> CallToolResult {
    let variables: Vec<_> = required_slots(platform, &CredentialsConfig::default())
        .into_iter()
        .map(|slot| slot.name)
        .collect();
    error_result(&format!(
        "{}. Set {} to enable it",
        PlatformError::NotConfigured(platform),
        variables.join(", ")
    ))
}

/// Single-platform search outcome: upstream failures become an empty list.
pub fn results_or_empty<T: Serialize>(
    platform: Platform,
    query: Option<&str>,
    outcome: Result<Vec<T>, PlatformError>,
) -> CallToolResult {
    let results = outcome.unwrap_or_else(|e| {
        warn!(platform = platform.as_str(), "Returning no results: {}", e);
        Vec::new()
    });
    json_result(&PlatformResults::new(platform, query, results))
}

/// Reject blank queries before any upstream call.
pub fn require_query(query: &str) -> Result<&str, CallToolResult> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(error_result("Query must not be empty"))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rmcp::model::{CallToolResult, RawContent};

    /// Text of the first content item.
    pub fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    /// First content item parsed as JSON.
    pub fn json_of(result: &CallToolResult) -> serde_json::Value {
        serde_json::from_str(&text_of(result)).expect("tool output should be JSON")
    }

    pub fn is_error(result: &CallToolResult) -> bool {
        result.is_error.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(0), 1);
        assert_eq!(validate_limit(10), 10);
        assert_eq!(validate_limit(500), 50);
    }

    #[test]
    fn test_video_params_accept_limit_alias() {
        let params: VideoSearchParams =
            serde_json::from_value(serde_json::json!({"query": "jazz", "limit": 3})).unwrap();
        assert_eq!(params.max_results, 3);

        let params: VideoSearchParams =
            serde_json::from_value(serde_json::json!({"query": "jazz"})).unwrap();
        assert_eq!(params.max_results, 10);
    }

    #[test]
    fn test_unavailable_result_names_variables() {
        let result = unavailable_result(Platform::Spotify);
        assert!(is_error(&result));
        let text = text_of(&result);
        assert!(text.starts_with("Spotify service unavailable"));
        assert!(text.contains("SPOTIFY_CLIENT_ID"));
        assert!(text.contains("SPOTIFY_CLIENT_SECRET"));
    }

    #[test]
    fn test_results_or_empty_absorbs_failures() {
        let outcome: Result<Vec<String>, PlatformError> =
            Err(PlatformError::decode(Platform::Lastfm, "bad payload"));
        let result = results_or_empty(Platform::Lastfm, Some("jazz"), outcome);

        assert!(!is_error(&result));
        let value = json_of(&result);
        assert_eq!(value["platform"], "lastfm");
        assert_eq!(value["query"], "jazz");
        assert_eq!(value["count"], 0);
        assert_eq!(value["results"], serde_json::json!([]));
    }
}
