//! Build script for storefront crate.
//!
//! Fingerprints the static assets referenced by `base.html` so their URLs
//! change whenever their content does, which lets browsers cache them
//! indefinitely.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Assets whose content feeds the fingerprint, relative to the crate root.
const FINGERPRINTED_ASSETS: [&str; 2] = ["static/css/main.css", "static/js/cart.js"];

fn main() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:rustc-env=ASSET_VERSION=dev");
        return;
    };

    let mut hasher = Sha256::new();
    for asset in FINGERPRINTED_ASSETS {
        let path = Path::new(&manifest_dir).join(asset);
        println!("cargo:rerun-if-changed={}", path.display());

        match fs::read(&path) {
            Ok(content) => hasher.update(&content),
            Err(e) => println!("cargo:warning=Could not read {asset}: {e}"),
        }
    }

    // First 8 hex chars of SHA256
    let hash = format!("{:x}", hasher.finalize());
    let short_hash = hash.get(..8).unwrap_or("dev");

    println!("cargo:rustc-env=ASSET_VERSION={short_hash}");
}
