//! Domains module containing business logic organized by bounded contexts.
//!
//! - `platforms`: upstream clients, normalized records, availability
//! - `aggregator`: concurrent cross-platform search and recommendations
//! - `tools`: the MCP tool surface

pub mod aggregator;
pub mod platforms;
pub mod tools;
