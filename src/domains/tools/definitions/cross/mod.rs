//! Cross-platform tools backed by the aggregator.

pub mod recommendations;
pub mod search_all;

pub use recommendations::{MusicRecommendationsParams, MusicRecommendationsTool};
pub use search_all::{SearchAllParams, SearchAllTool};
