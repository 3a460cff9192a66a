//! Last.fm tools.

pub mod charts;
pub mod search;

pub use charts::{SimilarTracksParams, SimilarTracksTool, TopTracksParams, TopTracksTool};
pub use search::{LastfmAlbumsTool, LastfmArtistsTool, LastfmSongsTool};
