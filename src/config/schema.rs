//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the build
//! toolchain. All types derive Serde traits for deserialization from config
//! files; defaults reproduce the Clavier web client's stock setup.

use serde::{Deserialize, Serialize};

/// Commented starter config written by `clavier-build init`.
///
/// Parses to exactly [`ClavierConfig::default`]; the unit tests hold the
/// two in sync.
pub const CONFIG_TEMPLATE: &str = r#"# Clavier build toolchain configuration.

# Plugins are applied in declaration order. Set `enabled = false` to park
# one without deleting its entry; free-form settings go in a
# [plugins.options] table.
[[plugins]]
name = "framework"

[[plugins]]
name = "pwa"

# Offline cache settings for the service-worker generator. Bumping
# `version` renames every runtime cache, invalidating the old ones on the
# next deploy.
[cache]
version = "v1"
precache_globs = ["**/*.{js,css,html,ico,png,svg,woff2}"]

# Runtime caching rules, first match wins.
# Strategies: cache-first | network-first | stale-while-revalidate
[[cache.rules]]
pattern = "/samples/*.mp3"
strategy = "cache-first"
cache_name = "samples"
max_entries = 500
max_age_secs = 31536000 # one year

[[cache.rules]]
pattern = "/soundfonts/*.sf2"
strategy = "cache-first"
cache_name = "soundfonts"
max_entries = 50
max_age_secs = 31536000

# Development server.
[dev_server]
port = 5173

# Requests under `path_prefix` are forwarded to `target` while developing.
# `change_origin` rewrites the Host header to match the target.
[[dev_server.proxy]]
path_prefix = "/api"
target = "http://localhost:3001"
change_origin = true

# Build output. The out dir is cleared before each build when
# `empty_out_dir` is set.
[build]
source_dir = "."
out_dir = "dist"
empty_out_dir = true
"#;

/// Root configuration for the Clavier build toolchain.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClavierConfig {
    /// Plugin pipeline, applied in declaration order.
    pub plugins: Vec<PluginConfig>,

    /// Offline cache settings handed to the service-worker generator.
    pub cache: CacheConfig,

    /// Development server settings (listen port, proxy rules).
    pub dev_server: DevServerConfig,

    /// Build output settings.
    pub build: BuildConfig,
}

impl Default for ClavierConfig {
    fn default() -> Self {
        Self {
            plugins: vec![PluginConfig::named("framework"), PluginConfig::named("pwa")],
            cache: CacheConfig::default(),
            dev_server: DevServerConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

/// A single plugin in the build pipeline.
///
/// Plugins are descriptors consumed by the external bundler; this crate only
/// preserves their order and options.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PluginConfig {
    /// Plugin identifier (e.g. "framework", "pwa").
    pub name: String,

    /// Disabled plugins stay in the file but are excluded from the pipeline.
    pub enabled: bool,

    /// Free-form plugin options, passed through untouched.
    pub options: toml::Table,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            enabled: true,
            options: toml::Table::new(),
        }
    }
}

impl PluginConfig {
    /// Convenience constructor for an enabled plugin without options.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Offline cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache version string, appended to every exported cache name.
    /// Bumping it invalidates all runtime caches on the next deploy.
    pub version: String,

    /// Glob patterns selecting build artifacts to precache.
    pub precache_globs: Vec<String>,

    /// Runtime caching rules, in match-priority order.
    pub rules: Vec<CacheRuleConfig>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            precache_globs: vec!["**/*.{js,css,html,ico,png,svg,woff2}".to_string()],
            rules: vec![
                CacheRuleConfig {
                    pattern: "/samples/*.mp3".to_string(),
                    strategy: CacheStrategy::CacheFirst,
                    cache_name: "samples".to_string(),
                    max_entries: 500,
                    max_age_secs: 31_536_000,
                },
                CacheRuleConfig {
                    pattern: "/soundfonts/*.sf2".to_string(),
                    strategy: CacheStrategy::CacheFirst,
                    cache_name: "soundfonts".to_string(),
                    max_entries: 50,
                    max_age_secs: 31_536_000,
                },
            ],
        }
    }
}

/// A single runtime caching rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CacheRuleConfig {
    /// URL pattern the rule applies to (opaque to this crate).
    pub pattern: String,

    /// Caching strategy for matching requests.
    pub strategy: CacheStrategy,

    /// Cache identifier, unique across all rules.
    pub cache_name: String,

    /// Maximum number of entries before the oldest is evicted.
    pub max_entries: u32,

    /// Maximum entry age in seconds.
    pub max_age_secs: u64,
}

/// Caching strategies understood by the service-worker generator.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CacheStrategy {
    /// Serve from cache, hit the network only on cache miss.
    CacheFirst,
    /// Try the network first, fall back to cache.
    NetworkFirst,
    /// Serve from cache, refresh the cached copy in the background.
    StaleWhileRevalidate,
}

/// Development server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DevServerConfig {
    /// Listen port for the dev server.
    pub port: u16,

    /// Proxy rules mapping path prefixes to backend origins.
    pub proxy: Vec<ProxyRuleConfig>,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            port: 5173,
            proxy: vec![ProxyRuleConfig::default()],
        }
    }
}

/// A single dev-server proxy rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProxyRuleConfig {
    /// Path prefix to match (must start with `/`, unique across rules).
    pub path_prefix: String,

    /// Target origin, scheme + host + port (e.g. "http://localhost:3001").
    pub target: String,

    /// Rewrite the Host header to the target origin when forwarding.
    pub change_origin: bool,
}

impl Default for ProxyRuleConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/api".to_string(),
            target: "http://localhost:3001".to_string(),
            change_origin: true,
        }
    }
}

/// Build output configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BuildConfig {
    /// Project source root.
    pub source_dir: String,

    /// Directory built artifacts are written to.
    pub out_dir: String,

    /// Clear the output directory before each build.
    pub empty_out_dir: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: ".".to_string(),
            out_dir: "dist".to_string(),
            empty_out_dir: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_client_setup() {
        let config = ClavierConfig::default();
        assert_eq!(config.dev_server.port, 5173);
        assert_eq!(config.build.out_dir, "dist");
        assert!(config.build.empty_out_dir);
        assert_eq!(config.dev_server.proxy[0].path_prefix, "/api");
        assert!(config.dev_server.proxy[0].change_origin);
    }

    #[test]
    fn strategy_uses_kebab_case_names() {
        let rule: CacheRuleConfig = toml::from_str(
            r#"
            pattern = "/samples/*.mp3"
            strategy = "cache-first"
            cache_name = "samples"
            max_entries = 500
            max_age_secs = 31536000
            "#,
        )
        .unwrap();
        assert_eq!(rule.strategy, CacheStrategy::CacheFirst);
    }

    #[test]
    fn template_parses_to_the_default_config() {
        let parsed: ClavierConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(parsed, ClavierConfig::default());
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: ClavierConfig = toml::from_str("[dev_server]\nport = 4000\n").unwrap();
        assert_eq!(config.dev_server.port, 4000);
        assert_eq!(config.build.out_dir, "dist");
        assert_eq!(config.cache.version, "v1");
    }
}
