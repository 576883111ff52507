//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A well-formed config exercising all four sections.
pub const FULL_CONFIG: &str = r#"
[[plugins]]
name = "framework"

[[plugins]]
name = "pwa"
[plugins.options]
register_type = "autoUpdate"

[cache]
version = "v2"
precache_globs = ["**/*.{js,css,html,ico,png,svg,woff2}"]

[[cache.rules]]
pattern = "/samples/*.mp3"
strategy = "cache-first"
cache_name = "samples"
max_entries = 500
max_age_secs = 31536000

[[cache.rules]]
pattern = "/soundfonts/*.sf2"
strategy = "stale-while-revalidate"
cache_name = "soundfonts"
max_entries = 50
max_age_secs = 31536000

[dev_server]
port = 5173

[[dev_server.proxy]]
path_prefix = "/api"
target = "http://localhost:3001"
change_origin = true

[build]
source_dir = "."
out_dir = "dist"
empty_out_dir = true
"#;

/// Write `content` as `clavier.toml` inside a fresh temp dir.
pub fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clavier.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}
