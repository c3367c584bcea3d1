//! Feedmix Tools module
//!
//! MCP tool implementations.

pub mod ingredients;
pub mod ration;
pub mod standards;
pub mod status;
