// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// How long a cached record set stays fresh, in milliseconds.
    pub cache_ttl_ms: i64,
    /// Fixed latency of the simulated fixture fetch, in milliseconds.
    pub fetch_latency_ms: u64,
    /// Rows per page on the certificates view.
    pub certificate_page_size: usize,
    /// Rows added per increment on the audit log view.
    pub audit_window_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_ttl_ms: 5 * 60 * 1000,
            fetch_latency_ms: 800,
            certificate_page_size: 5,
            audit_window_size: 15,
        }
    }
}
