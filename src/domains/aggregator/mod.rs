//! Cross-platform aggregation: concurrent fan-out, failure isolation and
//! the merged response envelopes.

pub mod envelope;
pub mod error;
pub mod orchestrator;

pub use envelope::{AggregatedResponse, PlatformSections, RecommendationResponse, Status};
pub use error::AggregationError;
pub use orchestrator::{
    Aggregator, BranchOutcome, DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_LIMIT,
};
