//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check uniqueness constraints (cache names, proxy prefixes)
//! - Validate value ranges (max entries/age > 0, port non-zero)
//! - Validate proxy targets as well-formed origins
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: &ClavierConfig -> Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::{ClavierConfig, ProxyRuleConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("plugin list is empty")]
    NoPlugins,

    #[error("plugin at index {0} has an empty name")]
    UnnamedPlugin(usize),

    #[error("duplicate plugin name: {0}")]
    DuplicatePlugin(String),

    #[error("cache version is empty")]
    EmptyCacheVersion,

    #[error("cache rule `{0}` has an empty URL pattern")]
    EmptyCachePattern(String),

    #[error("cache rule `{0}`: max_entries must be greater than zero")]
    ZeroMaxEntries(String),

    #[error("cache rule `{0}`: max_age_secs must be greater than zero")]
    ZeroMaxAge(String),

    #[error("duplicate cache name: {0}")]
    DuplicateCacheName(String),

    #[error("proxy path prefix must start with '/': {0:?}")]
    BadProxyPrefix(String),

    #[error("duplicate proxy path prefix: {0}")]
    DuplicateProxyPrefix(String),

    #[error("proxy rule `{prefix}`: target {target:?} is not a valid origin: {reason}")]
    BadProxyTarget {
        prefix: String,
        target: String,
        reason: String,
    },

    #[error("dev server port must be non-zero")]
    ZeroPort,

    #[error("output directory is empty")]
    EmptyOutDir,

    #[error("output directory equals source directory: {0}")]
    OutDirIsSourceDir(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ClavierConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_plugins(config, &mut errors);
    validate_cache(config, &mut errors);
    validate_dev_server(config, &mut errors);
    validate_build(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_plugins(config: &ClavierConfig, errors: &mut Vec<ValidationError>) {
    if config.plugins.is_empty() {
        errors.push(ValidationError::NoPlugins);
        return;
    }

    let mut seen = HashSet::new();
    for (index, plugin) in config.plugins.iter().enumerate() {
        if plugin.name.is_empty() {
            errors.push(ValidationError::UnnamedPlugin(index));
            continue;
        }
        if !seen.insert(plugin.name.as_str()) {
            errors.push(ValidationError::DuplicatePlugin(plugin.name.clone()));
        }
    }
}

fn validate_cache(config: &ClavierConfig, errors: &mut Vec<ValidationError>) {
    if config.cache.version.is_empty() {
        errors.push(ValidationError::EmptyCacheVersion);
    }

    let mut seen = HashSet::new();
    for rule in &config.cache.rules {
        if rule.pattern.is_empty() {
            errors.push(ValidationError::EmptyCachePattern(rule.cache_name.clone()));
        }
        if rule.max_entries == 0 {
            errors.push(ValidationError::ZeroMaxEntries(rule.cache_name.clone()));
        }
        if rule.max_age_secs == 0 {
            errors.push(ValidationError::ZeroMaxAge(rule.cache_name.clone()));
        }
        if !seen.insert(rule.cache_name.as_str()) {
            errors.push(ValidationError::DuplicateCacheName(rule.cache_name.clone()));
        }
    }
}

fn validate_dev_server(config: &ClavierConfig, errors: &mut Vec<ValidationError>) {
    if config.dev_server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let mut seen = HashSet::new();
    for rule in &config.dev_server.proxy {
        if !rule.path_prefix.starts_with('/') {
            errors.push(ValidationError::BadProxyPrefix(rule.path_prefix.clone()));
        } else if !seen.insert(rule.path_prefix.as_str()) {
            errors.push(ValidationError::DuplicateProxyPrefix(rule.path_prefix.clone()));
        }

        if let Err(reason) = check_origin(rule) {
            errors.push(ValidationError::BadProxyTarget {
                prefix: rule.path_prefix.clone(),
                target: rule.target.clone(),
                reason,
            });
        }
    }
}

/// An origin is scheme + host + port, nothing else.
fn check_origin(rule: &ProxyRuleConfig) -> Result<(), String> {
    let url = Url::parse(&rule.target).map_err(|e| e.to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {other:?}")),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err("origin must not carry userinfo".to_string());
    }
    if url.port_or_known_default().is_none() {
        return Err("missing port".to_string());
    }
    if url.path() != "/" && !url.path().is_empty() {
        return Err(format!("origin must not carry a path ({})", url.path()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("origin must not carry a query or fragment".to_string());
    }
    Ok(())
}

fn validate_build(config: &ClavierConfig, errors: &mut Vec<ValidationError>) {
    if config.build.out_dir.is_empty() {
        errors.push(ValidationError::EmptyOutDir);
    } else if config.build.out_dir == config.build.source_dir {
        errors.push(ValidationError::OutDirIsSourceDir(config.build.out_dir.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CacheRuleConfig, CacheStrategy, ClavierConfig};

    fn sample_rule(name: &str) -> CacheRuleConfig {
        CacheRuleConfig {
            pattern: "/samples/*.mp3".to_string(),
            strategy: CacheStrategy::CacheFirst,
            cache_name: name.to_string(),
            max_entries: 500,
            max_age_secs: 31_536_000,
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ClavierConfig::default()), Ok(()));
    }

    #[test]
    fn empty_plugin_list_is_rejected() {
        let mut config = ClavierConfig::default();
        config.plugins.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::NoPlugins));
    }

    #[test]
    fn duplicate_cache_names_are_rejected() {
        let mut config = ClavierConfig::default();
        config.cache.rules = vec![sample_rule("samples"), sample_rule("samples")];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateCacheName("samples".to_string())]
        );
    }

    #[test]
    fn zero_limits_are_rejected_together() {
        let mut config = ClavierConfig::default();
        let mut rule = sample_rule("samples");
        rule.max_entries = 0;
        rule.max_age_secs = 0;
        config.cache.rules = vec![rule];

        // Both problems reported in one pass, not just the first.
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroMaxEntries("samples".to_string())));
        assert!(errors.contains(&ValidationError::ZeroMaxAge("samples".to_string())));
    }

    #[test]
    fn proxy_target_must_be_bare_origin() {
        let mut config = ClavierConfig::default();
        config.dev_server.proxy[0].target = "http://localhost:3001/api".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::BadProxyTarget { .. }
        ));

        config.dev_server.proxy[0].target = "ftp://localhost:21".to_string();
        assert!(validate_config(&config).is_err());

        config.dev_server.proxy[0].target = "http://user:pw@localhost:3001".to_string();
        assert!(validate_config(&config).is_err());

        config.dev_server.proxy[0].target = "http://user@localhost:3001".to_string();
        assert!(validate_config(&config).is_err());

        config.dev_server.proxy[0].target = "http://localhost:3001".to_string();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn proxy_prefix_must_start_with_slash() {
        let mut config = ClavierConfig::default();
        config.dev_server.proxy[0].path_prefix = "api".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::BadProxyPrefix("api".to_string())]);
    }

    #[test]
    fn out_dir_must_differ_from_source_dir() {
        let mut config = ClavierConfig::default();
        config.build.source_dir = "web".to_string();
        config.build.out_dir = "web".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::OutDirIsSourceDir("web".to_string())]
        );
    }
}
