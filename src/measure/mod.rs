//! Measurement module
//!
//! Feed quantity units and conversions.

pub mod converter;
pub mod units;

pub use converter::{convert, kg_to_liters, liters_to_kg};
pub use units::{bulk_density, parse_unit, FeedUnit};
