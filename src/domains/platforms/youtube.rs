//! YouTube Data API v3 client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use super::error::Result;
use super::model::{Platform, Playlist, Video, identity, non_blank};
use super::traits::VideoPlatform;
use super::upstream::{fetch_json, join_url, lenient_u64, null_as_default};

const PLATFORM: Platform = Platform::YouTube;

/// Largest `maxResults` accepted by the search endpoint.
pub const MAX_PAGE_SIZE: u32 = 50;

/// YouTube "Music" video category.
const MUSIC_CATEGORY_ID: &str = "10";

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Canonical URL for a playlist ID.
pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={}", playlist_id)
}

/// YouTube video and playlist client.
pub struct YouTubeClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a new YouTube client.
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn search(&self, query: &str, kind: &str, limit: u32) -> Result<SearchResponse> {
        let max_results = limit.min(MAX_PAGE_SIZE).to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("q", query),
            ("type", kind),
            ("maxResults", max_results.as_str()),
            ("order", "relevance"),
            ("key", self.api_key.as_str()),
        ];
        if kind == "video" {
            params.push(("videoCategoryId", MUSIC_CATEGORY_ID));
        }

        let request = self
            .http
            .get(join_url(&self.api_url, "search"))
            .query(&params);
        fetch_json(PLATFORM, request).await
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    #[instrument(skip(self))]
    async fn search_videos(&self, query: &str, limit: u32) -> Result<Vec<Video>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let response = self.search(query, "video", limit).await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(SearchItem::into_video)
            .take(limit as usize)
            .collect())
    }

    #[instrument(skip(self))]
    async fn search_playlists(&self, query: &str, limit: u32) -> Result<Vec<Playlist>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let response = self.search(query, "playlist", limit).await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(SearchItem::into_playlist)
            .take(limit as usize)
            .collect())
    }

    #[instrument(skip(self))]
    async fn video_details(&self, video_id: &str) -> Result<Option<Video>> {
        let request = self
            .http
            .get(join_url(&self.api_url, "videos"))
            .query(&[
                ("part", "snippet,statistics,contentDetails"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ]);
        let response: VideosResponse = fetch_json(PLATFORM, request).await?;

        Ok(response.items.into_iter().find_map(VideoItem::into_video))
    }
}

/// Decode the handful of HTML entities YouTube leaves in snippet text.
fn unescape_html(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

// ============================================================================
// Upstream payloads
// ============================================================================

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: Option<SearchItemId>,
    snippet: Option<Snippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
    playlist_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    channel_title: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: Option<String>,
    snippet: Option<Snippet>,
    statistics: Option<Statistics>,
    content_details: Option<ContentDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    #[serde(default, deserialize_with = "lenient_u64")]
    view_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    like_count: Option<u64>,
}

#[derive(Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

impl Thumbnails {
    /// Best available thumbnail: high, then medium, then default.
    fn best(self) -> Option<String> {
        [self.high, self.medium, self.default]
            .into_iter()
            .flatten()
            .find_map(|t| non_blank(t.url))
    }
}

impl Snippet {
    fn title(&mut self) -> Option<String> {
        self.title.take().map(|t| unescape_html(&t))
    }

    fn fill_video(self, video: &mut Video) {
        video.channel = non_blank(self.channel_title);
        video.description = non_blank(self.description);
        video.published_at = non_blank(self.published_at);
        video.image = self.thumbnails.and_then(Thumbnails::best);
    }

    fn fill_playlist(self, playlist: &mut Playlist) {
        playlist.channel = non_blank(self.channel_title);
        playlist.description = non_blank(self.description);
        playlist.published_at = non_blank(self.published_at);
        playlist.image = self.thumbnails.and_then(Thumbnails::best);
    }
}

impl SearchItem {
    fn into_video(self) -> Option<Video> {
        let id = non_blank(self.id.and_then(|id| id.video_id));
        let mut snippet = self.snippet.unwrap_or_default();
        let (title, url) = identity(PLATFORM, "video", snippet.title(), id.as_deref().map(watch_url))?;

        let mut video = Video::new(PLATFORM, title, url);
        video.id = id;
        snippet.fill_video(&mut video);
        Some(video)
    }

    fn into_playlist(self) -> Option<Playlist> {
        let id = non_blank(self.id.and_then(|id| id.playlist_id));
        let mut snippet = self.snippet.unwrap_or_default();
        let (title, url) = identity(
            PLATFORM,
            "playlist",
            snippet.title(),
            id.as_deref().map(playlist_url),
        )?;

        let mut playlist = Playlist::new(PLATFORM, title, url);
        playlist.id = id;
        snippet.fill_playlist(&mut playlist);
        Some(playlist)
    }
}

impl VideoItem {
    fn into_video(self) -> Option<Video> {
        let id = non_blank(self.id);
        let mut snippet = self.snippet.unwrap_or_default();
        let (title, url) = identity(PLATFORM, "video", snippet.title(), id.as_deref().map(watch_url))?;

        let mut video = Video::new(PLATFORM, title, url);
        video.id = id;
        snippet.fill_video(&mut video);
        video.duration = self.content_details.and_then(|c| non_blank(c.duration));
        if let Some(stats) = self.statistics {
            video.view_count = stats.view_count;
            video.like_count = stats.like_count;
        }
        Some(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> YouTubeClient {
        YouTubeClient::new(reqwest::Client::new(), server.uri(), "yt-key")
    }

    fn video_item(id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": {"kind": "youtube#video", "videoId": id},
            "snippet": {
                "title": title,
                "channelTitle": "Blue Note Records",
                "description": "Official video",
                "publishedAt": "2019-05-01T12:00:00Z",
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/vi/x/default.jpg"},
                    "high": {"url": "https://i.ytimg.com/vi/x/hqdefault.jpg"}
                }
            }
        })
    }

    #[tokio::test]
    async fn test_search_videos() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "jazz"))
            .and(query_param("type", "video"))
            .and(query_param("videoCategoryId", "10"))
            .and(query_param("maxResults", "5"))
            .and(query_param("key", "yt-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [video_item("abc123", "Take Five &amp; More"), {"id": {"videoId": "nosnippet"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let videos = client_for(&server).search_videos("jazz", 5).await.unwrap();

        assert_eq!(videos.len(), 1);
        let video = &videos[0];
        assert_eq!(video.title, "Take Five & More");
        assert_eq!(video.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(video.channel.as_deref(), Some("Blue Note Records"));
        assert_eq!(video.image.as_deref(), Some("https://i.ytimg.com/vi/x/hqdefault.jpg"));
        assert_eq!(video.source, Platform::YouTube);
    }

    #[tokio::test]
    async fn test_search_playlists() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("type", "playlist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": {"kind": "youtube#playlist", "playlistId": "PL42"},
                    "snippet": {"title": "Jazz Classics", "channelTitle": "Jazz FM"}
                }]
            })))
            .mount(&server)
            .await;

        let playlists = client_for(&server).search_playlists("jazz", 5).await.unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].url, "https://www.youtube.com/playlist?list=PL42");
        assert_eq!(playlists[0].channel.as_deref(), Some("Jazz FM"));
        assert!(playlists[0].image.is_none());
    }

    #[tokio::test]
    async fn test_video_details() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "abc123",
                    "snippet": {"title": "So What", "channelTitle": "Miles Davis"},
                    "statistics": {"viewCount": "1000000", "likeCount": "25000"},
                    "contentDetails": {"duration": "PT9M22S"}
                }]
            })))
            .mount(&server)
            .await;

        let video = client_for(&server)
            .video_details("abc123")
            .await
            .unwrap()
            .expect("video should exist");

        assert_eq!(video.duration.as_deref(), Some("PT9M22S"));
        assert_eq!(video.view_count, Some(1_000_000));
        assert_eq!(video.like_count, Some(25_000));
    }

    #[tokio::test]
    async fn test_out_of_range_statistics_are_dropped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "abc123",
                    "snippet": {"title": "So What"},
                    "statistics": {"viewCount": "184467440737095516150", "likeCount": -3}
                }]
            })))
            .mount(&server)
            .await;

        let video = client_for(&server)
            .video_details("abc123")
            .await
            .unwrap()
            .expect("video should exist");

        assert_eq!(video.title, "So What");
        assert!(video.view_count.is_none());
        assert!(video.like_count.is_none());
    }

    #[tokio::test]
    async fn test_video_details_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let video = client_for(&server).video_details("missing").await.unwrap();
        assert!(video.is_none());
    }

    #[tokio::test]
    async fn test_quota_error_is_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "quotaExceeded"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).search_videos("jazz", 5).await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(unescape_html("Rock &amp; Roll"), "Rock & Roll");
        assert_eq!(unescape_html("Don&#39;t Stop"), "Don't Stop");
        assert_eq!(unescape_html("&quot;Live&quot;"), "\"Live\"");
    }
}
