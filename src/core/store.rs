//! Versioned configuration store
//!
//! Every logger reads its base settings from a [`ConfigProvider`]. The
//! provider's version tells a logger when its cached settings are stale.

use super::config::{ConfigPatch, LoggerConfig};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Read side of a configuration store, as seen by loggers
pub trait ConfigProvider: Send + Sync {
    /// Incremented by every `configure` call
    fn version(&self) -> u64;

    /// Current settings paired with the version they belong to
    fn snapshot(&self) -> (LoggerConfig, u64);
}

/// Mutable configuration plus a monotonically increasing version counter.
///
/// # Example
///
/// ```
/// use context_logger::{ConfigPatch, ConfigStore, ConfigProvider};
///
/// let store = ConfigStore::new();
/// store.configure(&ConfigPatch::new().trim(false));
/// assert_eq!(store.version(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ConfigStore {
    config: RwLock<LoggerConfig>,
    version: AtomicU64,
}

static GLOBAL: OnceLock<Arc<ConfigStore>> = OnceLock::new();

impl ConfigStore {
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    pub fn with_config(config: LoggerConfig) -> Self {
        Self {
            config: RwLock::new(config),
            version: AtomicU64::new(0),
        }
    }

    /// Process-wide store used by loggers that are not given a provider
    pub fn global() -> &'static Arc<ConfigStore> {
        GLOBAL.get_or_init(|| Arc::new(ConfigStore::new()))
    }

    /// Merge `patch` into the stored settings and bump the version.
    ///
    /// The version moves even when the patch is empty.
    pub fn configure(&self, patch: &ConfigPatch) {
        let mut config = self.config.write();
        config.apply(patch);
        self.version.fetch_add(1, Ordering::AcqRel);
    }
}

impl ConfigProvider for ConfigStore {
    #[inline]
    fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    fn snapshot(&self) -> (LoggerConfig, u64) {
        // Holding the read lock keeps the pair consistent with `configure`
        let config = self.config.read();
        (config.clone(), self.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_starts_at_zero() {
        let store = ConfigStore::new();
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_configure_bumps_version_by_one() {
        let store = ConfigStore::new();
        store.configure(&ConfigPatch::new().trim(false));
        assert_eq!(store.version(), 1);
        store.configure(&ConfigPatch::new());
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_snapshot_reflects_merge() {
        let store = ConfigStore::new();
        store.configure(&ConfigPatch::new().date_format("%Y"));
        store.configure(&ConfigPatch::new().ignore_empty(false));

        let (config, version) = store.snapshot();
        assert_eq!(version, 2);
        assert_eq!(config.date_format.as_deref(), Some("%Y"));
        assert!(!config.ignore_empty);
        assert!(config.trim);
    }

    #[test]
    fn test_global_is_shared() {
        let a = ConfigStore::global();
        let b = ConfigStore::global();
        assert!(Arc::ptr_eq(a, b));
    }
}
