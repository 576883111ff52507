//! Build and dev-server configuration front-end for the Clavier web client.
//!
//! The crate owns the toolchain configuration: a plugin pipeline, offline
//! cache rules for the service-worker generator, dev-server proxy rules,
//! and build output settings. It loads and validates the config, keeps a
//! hot-reloadable snapshot, and exports the normalized shapes the external
//! bundler, dev server, and service-worker generator consume. It does not
//! bundle, serve, or generate service workers itself.

pub mod config;
pub mod export;

pub use config::{load_config, ClavierConfig, ConfigError, ConfigHandle};
pub use export::{DevServerTable, PluginPipeline, SwGeneratorConfig};
