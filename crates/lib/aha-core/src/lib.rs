//! Core types and services for aha-mcp.
//!
//! This crate classifies Aha! reference numbers, talks to the Aha! GraphQL and
//! REST APIs through the [`client::AhaApi`] facade, and implements the tool
//! handlers on [`control::AhaControlPlane`]. It has no MCP dependency; the
//! `aha-mcp` crate maps its results and errors onto the protocol.

pub mod client;
pub mod control;
pub mod error;
pub mod models;
pub mod payload;
pub mod queries;
pub mod reference;
