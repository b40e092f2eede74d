//! Schema-version management for the favicon cache
//!
//! The persisted layout carries an integer version. When a release
//! changes what the cache stores, it bumps [`STORE_VERSION`] and the
//! first startup afterwards rebuilds derived state once.

use std::sync::Arc;

use serde_json::Value;
use startpage_host::CacheStore;
use startpage_host::keys::STORE_VERSION_KEY;

use crate::Result;

/// Current layout version of the persisted cache.
pub const STORE_VERSION: i64 = 1;

/// Detects store layout changes across releases.
pub struct StoreMigrator {
    cache: Arc<dyn CacheStore>,
    target: i64,
}

impl StoreMigrator {
    /// Migrator against the engine's current layout version.
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self::with_target(cache, STORE_VERSION)
    }

    /// Migrator against an explicit target version.
    pub fn with_target(cache: Arc<dyn CacheStore>, target: i64) -> Self {
        Self { cache, target }
    }

    /// Advance the persisted version when it lags the target.
    ///
    /// # Returns
    /// - `Ok(true)` when the persisted version was behind and has been
    ///   advanced; the caller must rebuild derived state
    /// - `Ok(false)` when the store is already current (or ahead)
    ///
    /// An absent or malformed version reads as 0. The new version is
    /// persisted before the caller rebuilds anything, so a crash
    /// mid-rebuild leaves a store that self-heals on the next full
    /// refresh instead of re-running migration forever.
    pub async fn check_and_migrate(&self) -> Result<bool> {
        let persisted = self
            .cache
            .get(STORE_VERSION_KEY)
            .await?
            .and_then(|value| value.as_i64())
            .unwrap_or(0);

        if persisted >= self.target {
            tracing::debug!(persisted, target = self.target, "store layout is current");
            return Ok(false);
        }

        self.cache
            .set(STORE_VERSION_KEY, Value::from(self.target))
            .await?;
        tracing::info!(
            from = persisted,
            to = self.target,
            "store layout advanced; rebuilding derived state"
        );
        Ok(true)
    }
}
