//! Runtime configuration
//!
//! Resolved from the environment once at startup.

use std::path::PathBuf;

/// Environment variable overriding the catalog database location
pub const DATABASE_PATH_ENV: &str = "FEEDMIX_DATABASE_PATH";
/// Maximum pooled SQLite connections
pub const POOL_SIZE_ENV: &str = "FEEDMIX_POOL_SIZE";
/// Log directive applied on top of `RUST_LOG`
pub const LOG_ENV: &str = "FEEDMIX_LOG";

pub const DEFAULT_POOL_SIZE: u32 = 10;
pub const DEFAULT_LOG_DIRECTIVE: &str = "feedmix=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub pool_size: u32,
    pub log_directive: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var(DATABASE_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),
            pool_size: parse_pool_size(std::env::var(POOL_SIZE_ENV).ok().as_deref()),
            log_directive: std::env::var(LOG_ENV)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string()),
        }
    }
}

/// Positive integers only; anything else falls back to the default
fn parse_pool_size(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_POOL_SIZE)
}

/// `<project>/data/feedmix.db`, resolved from the executable location
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // target/{debug,release} -> project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(root) = path.parent().and_then(|p| p.parent()) {
            path = root.to_path_buf();
        }
    }

    path.join("data").join("feedmix.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_parsing() {
        assert_eq!(parse_pool_size(None), DEFAULT_POOL_SIZE);
        assert_eq!(parse_pool_size(Some("4")), 4);
        assert_eq!(parse_pool_size(Some(" 16 ")), 16);
        assert_eq!(parse_pool_size(Some("0")), DEFAULT_POOL_SIZE);
        assert_eq!(parse_pool_size(Some("many")), DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_default_path_ends_in_data_dir() {
        let path = default_database_path();
        assert!(path.ends_with("data/feedmix.db"));
    }
}
