//! MCP tool modules.
//!
//! Tools are grouped by domain: reference lookups, searches, and feature
//! creation.

pub mod features;
pub mod records;
pub mod search;
