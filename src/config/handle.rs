//! Shared handle to the live configuration.
//!
//! The configuration is immutable once loaded; reload replaces the whole
//! snapshot atomically so readers never observe a half-updated config.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::ClavierConfig;

/// Atomically swappable `Arc<ClavierConfig>`.
///
/// Consumers call [`snapshot`](Self::snapshot) and hold the returned `Arc`
/// for as long as they need a consistent view; the reload loop calls
/// [`replace`](Self::replace) with a freshly validated config.
#[derive(Debug)]
pub struct ConfigHandle {
    inner: ArcSwap<ClavierConfig>,
}

impl ConfigHandle {
    /// Create a handle around an initial (already validated) configuration.
    pub fn new(config: ClavierConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(config),
        }
    }

    /// Take a snapshot of the current configuration.
    pub fn snapshot(&self) -> Arc<ClavierConfig> {
        self.inner.load_full()
    }

    /// Replace the active configuration with a new snapshot.
    pub fn replace(&self, config: ClavierConfig) {
        self.inner.store(Arc::new(config));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_survives_replace() {
        let handle = ConfigHandle::new(ClavierConfig::default());
        let before = handle.snapshot();

        let mut updated = ClavierConfig::default();
        updated.dev_server.port = 4000;
        handle.replace(updated);

        // The old snapshot keeps its values; new readers see the update.
        assert_eq!(before.dev_server.port, 5173);
        assert_eq!(handle.snapshot().dev_server.port, 4000);
    }
}
