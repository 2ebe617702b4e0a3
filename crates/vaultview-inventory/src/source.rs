// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Asynchronous record-set source. The production implementation parses a
// bundled JSON fixture after a fixed simulated latency; tests substitute
// synchronous stubs.

use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use vaultview_core::error::{Result, VaultviewError};
use vaultview_core::types::{AuditLogEntry, Certificate, CodeSigningKey, SshKey};

/// Default simulated fetch latency.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// One-method seam between a list controller and wherever records come
/// from.
pub trait DataSource<T> {
    /// Fetch the complete record set.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<T>>> + Send;
}

/// The four bundled fixture documents.
#[derive(Debug, Clone, Copy)]
enum Dataset {
    Certificates,
    SshKeys,
    CodeSigningKeys,
    AuditLogs,
}

impl Dataset {
    fn name(self) -> &'static str {
        match self {
            Self::Certificates => "certificates",
            Self::SshKeys => "ssh-keys",
            Self::CodeSigningKeys => "code-signing-keys",
            Self::AuditLogs => "audit-logs",
        }
    }

    fn raw_json(self) -> &'static str {
        match self {
            Self::Certificates => include_str!("../fixtures/certificates.json"),
            Self::SshKeys => include_str!("../fixtures/ssh-keys.json"),
            Self::CodeSigningKeys => include_str!("../fixtures/code-signing-keys.json"),
            Self::AuditLogs => include_str!("../fixtures/audit-logs.json"),
        }
    }
}

/// Bundled-fixture data source with a fixed simulated latency.
///
/// The type parameter is pinned by the named constructors so a source can
/// only parse the document that matches its record type.
pub struct FixtureSource<T> {
    dataset: Dataset,
    latency: Duration,
    _marker: PhantomData<fn() -> T>,
}

impl FixtureSource<Certificate> {
    pub fn certificates() -> Self {
        Self::for_dataset(Dataset::Certificates)
    }
}

impl FixtureSource<SshKey> {
    pub fn ssh_keys() -> Self {
        Self::for_dataset(Dataset::SshKeys)
    }
}

impl FixtureSource<CodeSigningKey> {
    pub fn code_signing_keys() -> Self {
        Self::for_dataset(Dataset::CodeSigningKeys)
    }
}

impl FixtureSource<AuditLogEntry> {
    pub fn audit_logs() -> Self {
        Self::for_dataset(Dataset::AuditLogs)
    }
}

impl<T> FixtureSource<T> {
    fn for_dataset(dataset: Dataset) -> Self {
        Self {
            dataset,
            latency: DEFAULT_LATENCY,
            _marker: PhantomData,
        }
    }

    /// Override the simulated latency (zero makes tests instant).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl<T: DeserializeOwned + Send> DataSource<T> for FixtureSource<T> {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<T>>> + Send {
        let dataset = self.dataset;
        let latency = self.latency;

        async move {
            tokio::time::sleep(latency).await;

            let records: Vec<T> = serde_json::from_str(dataset.raw_json())
                .map_err(|e| VaultviewError::Fixture(format!("{}: {e}", dataset.name())))?;

            debug!(dataset = dataset.name(), count = records.len(), "fixture loaded");
            Ok(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultview_core::types::TrustLevel;

    #[tokio::test]
    async fn certificates_fixture_parses() {
        let certs = FixtureSource::certificates()
            .with_latency(Duration::ZERO)
            .fetch_all()
            .await
            .expect("fetch certificates");

        assert!(!certs.is_empty());
        // Every id is unique.
        let mut ids: Vec<_> = certs.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), certs.len());
    }

    #[tokio::test]
    async fn ssh_keys_fixture_parses_with_server_associations() {
        let keys = FixtureSource::ssh_keys()
            .with_latency(Duration::ZERO)
            .fetch_all()
            .await
            .expect("fetch ssh keys");

        assert!(!keys.is_empty());
        assert!(keys.iter().any(|k| !k.servers.is_empty()));
        assert!(keys.iter().any(|k| k.trust_level == TrustLevel::Low));
    }

    #[tokio::test]
    async fn code_signing_fixture_parses() {
        let keys = FixtureSource::code_signing_keys()
            .with_latency(Duration::ZERO)
            .fetch_all()
            .await
            .expect("fetch code-signing keys");

        assert!(!keys.is_empty());
    }

    #[tokio::test]
    async fn audit_logs_fixture_parses_with_metadata() {
        let entries = FixtureSource::audit_logs()
            .with_latency(Duration::ZERO)
            .fetch_all()
            .await
            .expect("fetch audit logs");

        assert!(entries.len() >= 20);
        assert!(entries.iter().any(|e| !e.metadata.is_empty()));
    }
}
