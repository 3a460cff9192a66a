//! End-to-end checks: environment-style config, real platform clients,
//! upstreams served by wiremock.

use music_discovery_mcp::domains::platforms::RecommendationSeeds;
use music_discovery_mcp::{Config, McpServer, Platform};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config with Spotify and Last.fm pointed at the mock; YouTube has no key.
fn config_for(upstream: &MockServer) -> Config {
    let mut config = Config::default();
    config.credentials.spotify_client_id = Some("id".to_string());
    config.credentials.spotify_client_secret = Some("secret".to_string());
    config.credentials.lastfm_api_key = Some("key".to_string());
    config.platforms.spotify_api_url = format!("{}/v1", upstream.uri());
    config.platforms.spotify_token_url = format!("{}/api/token", upstream.uri());
    config.platforms.youtube_api_url = format!("{}/youtube/v3", upstream.uri());
    config.platforms.lastfm_api_url = format!("{}/2.0/", upstream.uri());
    config
}

async fn mount_token(upstream: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(upstream)
        .await;
}

async fn forbid_youtube(upstream: &MockServer) {
    Mock::given(path_regex("^/youtube"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(upstream)
        .await;
}

fn spotify_track(i: usize) -> serde_json::Value {
    json!({
        "id": format!("sp{i}"),
        "name": format!("Spotify jazz {i}"),
        "artists": [{"name": "Miles Davis"}],
        "external_urls": {"spotify": format!("https://open.spotify.com/track/sp{i}")}
    })
}

#[tokio::test]
async fn jazz_search_with_youtube_unconfigured() {
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    forbid_youtube(&upstream).await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "jazz"))
        .and(query_param("type", "track"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {"items": [spotify_track(1), spotify_track(2), spotify_track(3)]}
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("type", "artist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": {"items": [{
                "name": "John Coltrane",
                "external_urls": {"spotify": "https://open.spotify.com/artist/trane"}
            }]}
        })))
        .mount(&upstream)
        .await;
    // Albums upstream is down; that section degrades to an empty list.
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("type", "album"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/2.0/"))
        .and(query_param("method", "track.search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"trackmatches": {"track": [{
                "name": "Take Five",
                "artist": "Dave Brubeck",
                "url": "https://www.last.fm/music/Dave+Brubeck/_/Take+Five"
            }]}}
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/2.0/"))
        .and(query_param("method", "artist.search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": 10,
            "message": "Invalid API key"
        })))
        .mount(&upstream)
        .await;

    let server = McpServer::new(config_for(&upstream)).unwrap();
    assert!(server.services().is_available(Platform::Spotify));
    assert!(!server.services().is_available(Platform::YouTube));

    let response = server.aggregator().search_all("jazz", 2).await;
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["status"], "success");
    assert_eq!(value["query"], "jazz");

    let spotify_tracks = value["spotify"]["tracks"].as_array().unwrap();
    assert_eq!(spotify_tracks.len(), 2);
    assert_eq!(spotify_tracks[0]["name"], "Spotify jazz 1");
    assert_eq!(value["spotify"]["artists"][0]["name"], "John Coltrane");
    assert_eq!(value["spotify"]["albums"], json!([]));

    assert_eq!(value["youtube"], json!({"videos": [], "playlists": []}));

    assert_eq!(value["lastfm"]["tracks"][0]["name"], "Take Five");
    assert_eq!(value["lastfm"]["artists"], json!([]));
    assert_eq!(value["lastfm"]["albums"], json!([]));
}

#[tokio::test]
async fn blank_query_never_reaches_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let server = McpServer::new(config_for(&upstream)).unwrap();
    let value = serde_json::to_value(server.aggregator().search_all("   ", 5).await).unwrap();

    assert_eq!(value["status"], "error");
    assert_eq!(value["message"], "Query must not be empty");
    assert!(value.get("spotify").is_none());
}

#[tokio::test]
async fn recommendations_round_trip() {
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .and(query_param("seed_genres", "jazz,bebop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [spotify_track(7)]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = McpServer::new(config_for(&upstream)).unwrap();
    let seeds = RecommendationSeeds {
        seed_genres: vec!["jazz".to_string(), "bebop".to_string()],
        ..Default::default()
    };
    let value = serde_json::to_value(server.aggregator().get_recommendations(&seeds, 10).await).unwrap();

    assert_eq!(value["status"], "success");
    assert_eq!(value["recommendations"][0]["name"], "Spotify jazz 7");
    assert!(value.get("message").is_none());
}

#[tokio::test]
async fn recommendations_upstream_rejection_is_error_envelope() {
    let upstream = MockServer::start().await;
    mount_token(&upstream).await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"status": 400, "message": "No seeds provided"}
        })))
        .mount(&upstream)
        .await;

    let server = McpServer::new(config_for(&upstream)).unwrap();
    let response = server
        .aggregator()
        .get_recommendations(&RecommendationSeeds::default(), 10)
        .await;
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["status"], "error");
    assert!(!value["message"].as_str().unwrap().is_empty());
    assert!(value.get("recommendations").is_none());
}
