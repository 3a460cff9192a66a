//! YouTube tools.

pub mod search;
pub mod video_details;

pub use search::{YouTubePlaylistsTool, YouTubeVideosTool};
pub use video_details::{VideoDetailsParams, VideoDetailsTool};
