//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClavierConfig (validated, immutable)
//!     → shared via ConfigHandle (Arc snapshot) to all consumers
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → handle.rs swaps the Arc<ClavierConfig>
//!     → consumers observe the new snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A reload that fails validation never replaces the active config

pub mod handle;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use handle::ConfigHandle;
pub use loader::{load_config, ConfigError};
pub use schema::{
    BuildConfig, CacheConfig, CacheRuleConfig, CacheStrategy, ClavierConfig, DevServerConfig,
    PluginConfig, ProxyRuleConfig, CONFIG_TEMPLATE,
};
pub use validation::{validate_config, ValidationError};
