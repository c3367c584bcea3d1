//! Build script for Feedmix
//!
//! Embeds a build number and compile timestamp. CI can pin the number by
//! exporting FEEDMIX_BUILD_NUMBER; local builds bump a counter file instead.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

fn next_local_build() -> u64 {
    let path = Path::new(COUNTER_FILE);
    let previous: u64 = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let next = previous + 1;
    if let Err(e) = fs::write(path, next.to_string()) {
        println!("cargo:warning=could not update {}: {}", COUNTER_FILE, e);
    }
    next
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=FEEDMIX_BUILD_NUMBER");

    let build_number = std::env::var("FEEDMIX_BUILD_NUMBER")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(next_local_build);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    println!("cargo:rustc-env=FEEDMIX_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=FEEDMIX_BUILD_TIMESTAMP={}", timestamp);
}
