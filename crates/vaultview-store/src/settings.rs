// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User settings — an explicit, injectable object with get/set/subscribe,
// persisted through the cache's preference namespace. No module-level
// singleton: whoever owns the store hands it to whoever needs it.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::cache::AssetCache;
use vaultview_core::types::ViewMode;

/// Preference key for the dark-mode flag.
const PREF_DARK_MODE: &str = "dark_mode";

/// Preference key for the code-signing view mode.
const PREF_CODE_SIGNING_VIEW: &str = "code_signing_view";

/// The user-tunable settings surfaced in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub dark_mode: bool,
    pub code_signing_view: ViewMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            code_signing_view: ViewMode::Table,
        }
    }
}

type Subscriber = Box<dyn Fn(&Settings) + Send>;

/// Subscribable settings store.
///
/// The current value is loaded from the preference namespace at
/// construction; every `set` persists the change and notifies all
/// subscribers with the new value.
pub struct SettingsStore {
    cache: Arc<Mutex<AssetCache>>,
    current: Mutex<Settings>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl SettingsStore {
    /// Load persisted settings (or defaults) from the given cache handle.
    pub fn new(cache: Arc<Mutex<AssetCache>>) -> Self {
        let current = {
            let guard = cache.lock().expect("cache lock poisoned");
            Settings {
                dark_mode: guard.get_preference(PREF_DARK_MODE, false),
                code_signing_view: guard.get_preference(PREF_CODE_SIGNING_VIEW, ViewMode::Table),
            }
        };

        Self {
            cache,
            current: Mutex::new(current),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the current settings.
    pub fn get(&self) -> Settings {
        *self.current.lock().expect("settings lock poisoned")
    }

    /// Replace the settings, persist them, and notify subscribers.
    pub fn set(&self, settings: Settings) {
        {
            let cache = self.cache.lock().expect("cache lock poisoned");
            if let Err(e) = cache.set_preference(PREF_DARK_MODE, &settings.dark_mode) {
                error!(error = %e, "failed to persist dark-mode preference");
            }
            if let Err(e) =
                cache.set_preference(PREF_CODE_SIGNING_VIEW, &settings.code_signing_view)
            {
                error!(error = %e, "failed to persist view-mode preference");
            }
        }

        *self.current.lock().expect("settings lock poisoned") = settings;

        for subscriber in self.subscribers.lock().expect("subscriber lock poisoned").iter() {
            subscriber(&settings);
        }
    }

    /// Flip just the dark-mode flag.
    pub fn set_dark_mode(&self, dark_mode: bool) {
        let mut settings = self.get();
        settings.dark_mode = dark_mode;
        self.set(settings);
    }

    /// Change just the code-signing view mode.
    pub fn set_view_mode(&self, view: ViewMode) {
        let mut settings = self.get();
        settings.code_signing_view = view;
        self.set(settings);
    }

    /// Register a callback invoked after every change.
    pub fn subscribe(&self, f: impl Fn(&Settings) + Send + 'static) {
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push(Box::new(f));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_store() -> (SettingsStore, Arc<Mutex<AssetCache>>) {
        let cache = Arc::new(Mutex::new(
            AssetCache::open_in_memory().expect("open in-memory cache"),
        ));
        (SettingsStore::new(cache.clone()), cache)
    }

    #[test]
    fn defaults_when_nothing_persisted() {
        let (store, _cache) = make_store();
        assert_eq!(store.get(), Settings::default());
    }

    #[test]
    fn set_persists_and_a_new_handle_sees_it() {
        let (store, cache) = make_store();
        store.set(Settings {
            dark_mode: true,
            code_signing_view: ViewMode::Grid,
        });

        let reloaded = SettingsStore::new(cache);
        assert!(reloaded.get().dark_mode);
        assert_eq!(reloaded.get().code_signing_view, ViewMode::Grid);
    }

    #[test]
    fn subscribers_observe_every_change() {
        let (store, _cache) = make_store();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_in_callback = seen.clone();
        store.subscribe(move |settings| {
            if settings.dark_mode {
                seen_in_callback.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.set_dark_mode(true);
        store.set_dark_mode(true);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn partial_setters_keep_the_other_field() {
        let (store, _cache) = make_store();
        store.set_view_mode(ViewMode::Grid);
        store.set_dark_mode(true);

        let settings = store.get();
        assert!(settings.dark_mode);
        assert_eq!(settings.code_signing_view, ViewMode::Grid);
    }
}
