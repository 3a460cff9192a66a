//! Tools domain module.
//!
//! Tools are the MCP surface of the server: one tool per platform operation
//! plus the two cross-platform tools backed by the aggregator.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, grouped by platform
//! - `handlers.rs` - The `MusicTool` trait and the shared `ToolContext`
//! - `router.rs` - ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Tool listing and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Implement `MusicTool` for a unit struct in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs` and its entry in `registry.rs`

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::{MusicTool, ToolContext, parse_params};
pub use registry::ToolRegistry;
pub use router::build_tool_router;
