//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from an upstream music platform.
    #[error("Platform error: {0}")]
    Platform(#[from] crate::domains::platforms::PlatformError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::platforms::{Platform, PlatformError};

    #[test]
    fn test_platform_error_conversion() {
        let err: Error = PlatformError::NotConfigured(Platform::YouTube).into();
        assert_eq!(err.to_string(), "Platform error: YouTube service unavailable");
    }

    #[test]
    fn test_tool_error_conversion() {
        let err: Error = crate::domains::tools::ToolError::not_found("nope").into();
        assert_eq!(err.to_string(), "Tool error: Tool not found: nope");
    }

    #[test]
    fn test_config_error_message() {
        let err = Error::config("bad timeout");
        assert_eq!(err.to_string(), "Configuration error: bad timeout");
    }
}
