//! Feedmix Library
//!
//! Livestock ration formulation over a tenant-scoped feed catalog.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod db;
pub mod formulation;
pub mod mcp;
pub mod measure;
pub mod models;
pub mod tools;

pub use catalog::{visible, MemoryCatalog, NutrientCatalog, SqliteCatalog};
pub use formulation::{RationError, RationFormulator, RationItem};
