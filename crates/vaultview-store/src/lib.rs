// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vaultview — Local persistence: SQLite key-value store, time-bounded
// cache, and the subscribable settings store.

pub mod cache;
pub mod kv;
pub mod settings;

pub use cache::{AssetCache, Clock, ManualClock, SystemClock};
pub use kv::KvStore;
pub use settings::{Settings, SettingsStore};
