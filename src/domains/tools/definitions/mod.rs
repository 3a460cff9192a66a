//! Tool definitions module.
//!
//! One module per platform plus the cross-platform tools. Each tool is a
//! unit struct implementing `MusicTool`.

pub mod common;
pub mod cross;
pub mod lastfm;
pub mod spotify;
pub mod youtube;

pub use cross::{MusicRecommendationsTool, SearchAllTool};
pub use lastfm::{LastfmAlbumsTool, LastfmArtistsTool, LastfmSongsTool, SimilarTracksTool, TopTracksTool};
pub use spotify::{SpotifyAlbumsTool, SpotifyArtistsTool, SpotifyRecommendationsTool, SpotifyTracksTool};
pub use youtube::{VideoDetailsTool, YouTubePlaylistsTool, YouTubeVideosTool};
