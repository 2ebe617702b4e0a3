// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Time-bounded cache over the key-value store.
//
// Record sets are persisted as `{ value, captured_at_ms }` envelopes under
// the `identity_asset_` namespace and expire five minutes after capture.
// A parallel `pref_` namespace holds user preferences that never expire.
// Any unreadable entry is a miss, never an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use vaultview_core::error::Result;

use crate::kv::KvStore;

/// Namespace prefix for every key this cache owns.
const CACHE_PREFIX: &str = "identity_asset_";

/// Sub-prefix distinguishing non-expiring preference entries.
const PREF_PREFIX: &str = "pref_";

/// Default freshness window: five minutes.
pub const DEFAULT_TTL_MS: i64 = 5 * 60 * 1000;

/// Source of "now" in epoch milliseconds, injectable so expiry is testable
/// without sleeping.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Hand-advanced clock (useful for tests).
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Persisted cache entry: the value plus its capture instant.
#[derive(Serialize, Deserialize)]
struct CacheEnvelope<T> {
    value: T,
    captured_at_ms: i64,
}

/// Time-bounded cache and preference store over a [`KvStore`].
pub struct AssetCache {
    store: KvStore,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
}

impl AssetCache {
    /// Wrap an already-open store with the system clock and default TTL.
    pub fn new(store: KvStore) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            ttl_ms: DEFAULT_TTL_MS,
        }
    }

    /// Open (or create) the backing database at `path`.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(KvStore::open(path)?))
    }

    /// Open an in-memory cache (useful for tests and the no-persistence
    /// fallback).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(KvStore::open_in_memory()?))
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the freshness window.
    pub fn with_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    fn cache_key(key: &str) -> String {
        format!("{CACHE_PREFIX}{key}")
    }

    fn pref_key(key: &str) -> String {
        format!("{CACHE_PREFIX}{PREF_PREFIX}{key}")
    }

    /// Persist `value` under `key`, stamped with the current instant.
    #[instrument(skip(self, value), fields(%key))]
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let envelope = CacheEnvelope {
            value,
            captured_at_ms: self.clock.now_ms(),
        };
        let json = serde_json::to_string(&envelope)?;
        self.store.put(&Self::cache_key(key), &json)?;
        debug!(len = json.len(), "cache entry written");
        Ok(())
    }

    /// Retrieve the value under `key` if present and fresh.
    ///
    /// Absent, malformed, and expired entries are all misses; malformed and
    /// expired entries are evicted on the way out. Store read failures are
    /// misses too — the caller retries against the fixture source anyway.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let namespaced = Self::cache_key(key);

        let raw = match self.store.fetch(&namespaced) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(%key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        let envelope: CacheEnvelope<T> = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!(%key, error = %e, "malformed cache entry evicted");
                let _ = self.store.delete(&namespaced);
                return None;
            }
        };

        let age_ms = self.clock.now_ms() - envelope.captured_at_ms;
        if age_ms > self.ttl_ms {
            debug!(%key, age_ms, "expired cache entry evicted");
            let _ = self.store.delete(&namespaced);
            return None;
        }

        debug!(%key, age_ms, "cache hit");
        Some(envelope.value)
    }

    /// Evict the entry under `key`. Idempotent.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.store.delete(&Self::cache_key(key))
    }

    /// Evict everything in the namespace — cached record sets and
    /// preferences alike.
    pub fn clear_all(&self) -> Result<()> {
        self.store.delete_with_prefix(CACHE_PREFIX)?;
        Ok(())
    }

    /// Persist a non-expiring preference.
    #[instrument(skip(self, value), fields(%key))]
    pub fn set_preference<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.put(&Self::pref_key(key), &json)
    }

    /// Retrieve a preference, falling back to `default` on miss or parse
    /// failure.
    pub fn get_preference<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.store.fetch(&Self::pref_key(key)) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or(default),
            _ => default,
        }
    }
}
