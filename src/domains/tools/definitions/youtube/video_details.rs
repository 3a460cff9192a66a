//! YouTube video details lookup.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, warn};

use super::super::common::{error_result, json_result, unavailable_result};
use crate::domains::platforms::Platform;
use crate::domains::tools::handlers::{MusicTool, ToolContext};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VideoDetailsParams {
    #[schemars(description = "YouTube video ID (the v= part of a watch URL)")]
    pub video_id: String,
}

#[derive(Debug, Clone)]
pub struct VideoDetailsTool;

impl MusicTool for VideoDetailsTool {
    const NAME: &'static str = "get_youtube_video_details";

    const DESCRIPTION: &'static str = "Get detailed information about a YouTube video: title, channel, description, duration (ISO 8601), view and like counts.";

    type Params = VideoDetailsParams;

    fn execute(context: ToolContext, params: Self::Params) -> BoxFuture<'static, CallToolResult> {
        async move {
            let Some(client) = context.services.youtube() else {
                return unavailable_result(Platform::YouTube);
            };
            let video_id = params.video_id.trim();
            if video_id.is_empty() {
                return error_result("video_id must not be empty");
            }

            info!("Fetching YouTube video details: {}", video_id);
            match client.video_details(video_id).await {
                Ok(Some(video)) => json_result(&video),
                Ok(None) => error_result(&format!("Video not found: {}", video_id)),
                Err(e) => {
                    warn!("Video details lookup failed: {}", e);
                    error_result(&format!("Failed to fetch video details: {}", e))
                }
            }
        }
        .boxed()
    }
}
