//! Plugin pipeline export.
//!
//! Declaration order is the transform application order, so the only job
//! here is filtering out disabled plugins without disturbing that order.

use serde::Serialize;

use crate::config::schema::ClavierConfig;

/// Ordered plugin pipeline handed to the external bundler.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PluginPipeline {
    pub plugins: Vec<PluginEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PluginEntry {
    pub name: String,
    pub options: toml::Table,
}

impl PluginPipeline {
    /// Build the pipeline from a validated configuration.
    pub fn from_config(config: &ClavierConfig) -> Self {
        let plugins = config
            .plugins
            .iter()
            .filter(|plugin| plugin.enabled)
            .map(|plugin| PluginEntry {
                name: plugin.name.clone(),
                options: plugin.options.clone(),
            })
            .collect();

        Self { plugins }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
