// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — opens the local store once at startup and hands
// the cache, settings, and config handles to the Dioxus pages.
//
// The rusqlite-backed store is `Send` but not `Sync`, so it is wrapped in
// `Arc<Mutex<>>` for safe sharing across the Dioxus task pool. Mutex
// contention is minimal because all operations are fast single-row
// SQLite queries.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{error, info};

use vaultview_core::AppConfig;
use vaultview_core::error::Result;
use vaultview_store::{AssetCache, SettingsStore};

use super::data_dir;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can
/// be passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    cache: Arc<Mutex<AssetCache>>,
    settings: Arc<SettingsStore>,
    config: Arc<Mutex<AppConfig>>,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    ///
    /// Creates the data directory, opens the SQLite-backed store, and
    /// loads the persisted config (or defaults).
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();

        let store_path = dir.join("assets.db");
        let cache = Arc::new(Mutex::new(
            AssetCache::open(&store_path)?.with_ttl_ms(config.cache_ttl_ms),
        ));
        let settings = Arc::new(SettingsStore::new(cache.clone()));

        info!("app services initialised");

        Ok(Self {
            cache,
            settings,
            config: Arc::new(Mutex::new(config)),
            data_dir: dir,
        })
    }

    /// In-memory services for when persistent storage is unavailable.
    /// Nothing survives a restart, but every view still works.
    pub fn fallback() -> Result<Self> {
        let config = AppConfig::default();
        let cache = Arc::new(Mutex::new(
            AssetCache::open_in_memory()?.with_ttl_ms(config.cache_ttl_ms),
        ));
        let settings = Arc::new(SettingsStore::new(cache.clone()));

        Ok(Self {
            cache,
            settings,
            config: Arc::new(Mutex::new(config)),
            data_dir: std::env::temp_dir(),
        })
    }

    // -- Handles ------------------------------------------------------------

    /// The shared cache handle list controllers persist through.
    pub fn cache(&self) -> Arc<Mutex<AssetCache>> {
        self.cache.clone()
    }

    /// The subscribable settings store.
    pub fn settings(&self) -> Arc<SettingsStore> {
        self.settings.clone()
    }

    /// Evict every cached record set and preference.
    pub fn clear_cache(&self) {
        let cache = self.cache.lock().expect("cache lock poisoned");
        if let Err(e) = cache.clear_all() {
            error!(error = %e, "failed to clear cache");
        }
    }

    // -- Config persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Simulated fetch latency from the current config.
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.config().fetch_latency_ms)
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_config(&self.data_dir, config)
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &std::path::Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

fn persist_config(data_dir: &std::path::Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
