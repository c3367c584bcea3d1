//! Build information
//!
//! Compile-time build number and timestamp plus the catalog layout this
//! binary expects.

use serde::Serialize;

use crate::db::{migrations::SCHEMA_VERSION, seed::MASTER_FEED_COUNT};

/// Build number, set by build.rs
pub const BUILD_NUMBER: u64 = match option_env!("FEEDMIX_BUILD_NUMBER") {
    Some(s) => parse_u64(s),
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("FEEDMIX_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Decimal digits only; anything else yields 0
const fn parse_u64(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return 0;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    result
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    /// Schema version this binary migrates to
    pub schema_version: i32,
    pub master_feeds: usize,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            schema_version: SCHEMA_VERSION,
            master_feeds: MASTER_FEED_COUNT,
        }
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  Feedmix ration formulation server");
    eprintln!("  Version: {} | Build: {}", info.version, info.build_number);
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!(
        "  Catalog schema: v{} | Master feeds: {}",
        info.schema_version, info.master_feeds
    );
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), 42);
        assert_eq!(parse_u64("0"), 0);
        assert_eq!(parse_u64(""), 0);
        assert_eq!(parse_u64("4x"), 0);
    }

    #[test]
    fn test_current_reports_catalog_layout() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "feedmix");
        assert_eq!(info.master_feeds, 30);
        assert!(info.schema_version >= 1);
    }
}
