//! Service-worker generator export.
//!
//! # Responsibilities
//! - Flatten cache settings into the shape the SW generator consumes
//! - Version cache names so a version bump invalidates old caches
//! - Preserve rule order (first matching rule wins in the generated worker)

use serde::Serialize;

use crate::config::schema::{CacheStrategy, ClavierConfig};

/// Input handed to the external service-worker generator.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SwGeneratorConfig {
    /// Glob patterns selecting build artifacts to precache.
    pub precache_globs: Vec<String>,

    /// Runtime caching entries, in match-priority order.
    pub runtime_caching: Vec<RuntimeCacheEntry>,
}

/// A single runtime caching entry with its versioned cache name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RuntimeCacheEntry {
    pub url_pattern: String,
    pub strategy: CacheStrategy,
    pub cache_name: String,
    pub max_entries: u32,
    pub max_age_secs: u64,
}

impl SwGeneratorConfig {
    /// Build the generator input from a validated configuration.
    pub fn from_config(config: &ClavierConfig) -> Self {
        let runtime_caching = config
            .cache
            .rules
            .iter()
            .map(|rule| RuntimeCacheEntry {
                url_pattern: rule.pattern.clone(),
                strategy: rule.strategy,
                cache_name: format!("{}-{}", rule.cache_name, config.cache.version),
                max_entries: rule.max_entries,
                max_age_secs: rule.max_age_secs,
            })
            .collect();

        Self {
            precache_globs: config.cache.precache_globs.clone(),
            runtime_caching,
        }
    }

    /// Serialize for handoff to the generator.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
