//! Build script for storefront crate.
//!
//! Fingerprints the static assets so templates can reference them with a
//! content hash and browsers never run a stale `showPage` helper.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Assets to fingerprint: (path under `static/`, env var receiving the hash).
const ASSETS: &[(&str, &str)] = &[("css/main.css", "CSS_HASH"), ("js/app.js", "JS_HASH")];

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    for (relative, env_name) in ASSETS {
        let path = static_dir.join(relative);
        println!("cargo:rerun-if-changed={}", path.display());
        println!("cargo:rustc-env={env_name}={}", short_hash(&path));
    }
}

/// First 8 hex chars of the file's SHA-256, or empty if it can't be read.
fn short_hash(path: &Path) -> String {
    match fs::read(path) {
        Ok(content) => {
            let digest = format!("{:x}", Sha256::digest(&content));
            digest.chars().take(8).collect()
        }
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", path.display());
            String::new()
        }
    }
}
