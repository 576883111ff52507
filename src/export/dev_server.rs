//! Dev-server export.
//!
//! # Responsibilities
//! - Flatten proxy rules into the table the dev server consumes
//! - Order rows longest-prefix-first so prefix matching is deterministic
//!   regardless of declaration order

use serde::Serialize;

use crate::config::schema::ClavierConfig;

/// Proxy table handed to the external dev server.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DevServerTable {
    /// Listen port for the dev server.
    pub port: u16,

    /// Proxy rows, longest prefix first.
    pub proxy: Vec<ProxyRow>,
}

/// One forwarding row: requests under `path_prefix` go to `target`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProxyRow {
    pub path_prefix: String,
    pub target: String,
    pub change_origin: bool,
}

impl DevServerTable {
    /// Build the table from a validated configuration.
    pub fn from_config(config: &ClavierConfig) -> Self {
        let mut proxy: Vec<ProxyRow> = config
            .dev_server
            .proxy
            .iter()
            .map(|rule| ProxyRow {
                path_prefix: rule.path_prefix.clone(),
                target: rule.target.clone(),
                change_origin: rule.change_origin,
            })
            .collect();

        // Longest prefix first; ties broken lexicographically. Prefixes are
        // unique after validation so the order is total.
        proxy.sort_by(|a, b| {
            b.path_prefix
                .len()
                .cmp(&a.path_prefix.len())
                .then_with(|| a.path_prefix.cmp(&b.path_prefix))
        });

        Self {
            port: config.dev_server.port,
            proxy,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ClavierConfig, ProxyRuleConfig};

    #[test]
    fn rows_are_sorted_longest_prefix_first() {
        let mut config = ClavierConfig::default();
        config.dev_server.proxy = vec![
            ProxyRuleConfig {
                path_prefix: "/api".to_string(),
                target: "http://localhost:3001".to_string(),
                change_origin: true,
            },
            ProxyRuleConfig {
                path_prefix: "/api/midi".to_string(),
                target: "http://localhost:3002".to_string(),
                change_origin: false,
            },
        ];

        let table = DevServerTable::from_config(&config);
        assert_eq!(table.proxy[0].path_prefix, "/api/midi");
        assert_eq!(table.proxy[1].path_prefix, "/api");
    }

    #[test]
    fn port_and_flags_pass_through() {
        let table = DevServerTable::from_config(&ClavierConfig::default());
        assert_eq!(table.port, 5173);
        assert!(table.proxy[0].change_origin);
        assert_eq!(table.proxy[0].target, "http://localhost:3001");
    }
}
