//! Aggregation errors.

use thiserror::Error;

use crate::domains::platforms::PlatformError;

/// Errors that turn a whole aggregated request into an error envelope.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Limit must be at least 1")]
    InvalidLimit,

    /// A single-platform request failed upstream.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}
