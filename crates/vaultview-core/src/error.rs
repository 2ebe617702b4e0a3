// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Vaultview.

use thiserror::Error;

/// Top-level error type for all Vaultview operations.
#[derive(Debug, Error)]
pub enum VaultviewError {
    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    // -- Fixture data source --
    #[error("fixture load failed: {0}")]
    Fixture(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VaultviewError>;
