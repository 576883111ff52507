//! Export subsystem.
//!
//! # Data Flow
//! ```text
//! ClavierConfig (validated)
//!     → service_worker.rs (precache globs + versioned runtime cache rules)
//!     → dev_server.rs (listen port + longest-prefix-first proxy table)
//!     → pipeline.rs (enabled plugins in declaration order)
//!     → JSON handed to the external consumers
//! ```
//!
//! # Design Decisions
//! - Exports are derived fresh from a snapshot; nothing here is cached
//! - Consumers never see raw config: only the normalized shapes
//! - Cache names carry the version suffix so a bump invalidates old caches

pub mod dev_server;
pub mod pipeline;
pub mod service_worker;

pub use dev_server::DevServerTable;
pub use pipeline::PluginPipeline;
pub use service_worker::SwGeneratorConfig;
