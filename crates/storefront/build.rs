//! Build script for storefront crate.
//!
//! Computes a content hash of the stylesheet so pages can reference it with
//! a cache-busting query string.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    hash_css();
}

/// Hash main.css and expose the first 8 hex chars as `CSS_HASH`.
///
/// Read at compile time with `env!("CSS_HASH")`.
fn hash_css() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:rustc-env=CSS_HASH=dev");
        return;
    };
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=dev");
            return;
        }
    };

    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = format!("{:x}", hasher.finalize());
    let short_hash: String = hash.chars().take(8).collect();

    println!("cargo:rustc-env=CSS_HASH={short_hash}");
}
