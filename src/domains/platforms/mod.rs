//! Music platforms domain.
//!
//! Normalized record types, the per-platform client traits, the HTTP
//! clients for Spotify, YouTube and Last.fm, and the credential gate that
//! decides which of them are wired into [`MusicServices`].

pub mod availability;
pub mod error;
pub mod lastfm;
pub mod model;
pub mod services;
pub mod spotify;
#[cfg(test)]
pub mod testing;
pub mod traits;
pub mod upstream;
pub mod youtube;

pub use availability::{Availability, missing_credentials};
pub use error::PlatformError;
pub use lastfm::LastfmClient;
pub use model::{Album, Artist, Platform, Playlist, Track, Video};
pub use services::MusicServices;
pub use spotify::SpotifyClient;
pub use traits::{CatalogPlatform, RecommendationSeeds, ScrobblePlatform, VideoPlatform};
pub use youtube::YouTubeClient;
