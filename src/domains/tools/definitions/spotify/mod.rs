//! Spotify tools.

pub mod recommendations;
pub mod search;

pub use recommendations::{SpotifyRecommendationsParams, SpotifyRecommendationsTool};
pub use search::{SpotifyAlbumsTool, SpotifyArtistsTool, SpotifyTracksTool};
