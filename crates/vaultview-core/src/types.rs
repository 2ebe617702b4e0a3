// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Vaultview asset dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle classification of a TLS certificate.
///
/// The stored value is a static label from the fixture; the live
/// classification derived from the expiry timestamp may disagree with it
/// and the two are never reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Active,
    Expired,
    ExpiringSoon,
}

impl CertificateStatus {
    /// Human-readable badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::ExpiringSoon => "Expiring soon",
        }
    }
}

/// Assessed trust level of an SSH key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    High,
    Medium,
    Low,
}

impl TrustLevel {
    /// Fixed ordinal rank used for sorting (`high=3, medium=2, low=1`).
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Human-readable badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Where a code-signing key's private material lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtectionLevel {
    #[serde(rename = "HSM")]
    Hsm,
    Software,
}

impl ProtectionLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hsm => "HSM",
            Self::Software => "Software",
        }
    }
}

/// Lifecycle state of a code-signing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Active,
    Expired,
}

impl KeyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
        }
    }
}

/// A TLS certificate tracked in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub issuer: String,
    pub status: CertificateStatus,
    pub issued_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub algorithm: String,
    pub serial_number: String,
}

/// A server an SSH key is authorized on (composition — no independent
/// lifecycle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRef {
    pub name: String,
    pub address: String,
}

/// An SSH key tracked in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKey {
    pub id: String,
    pub key_owner: String,
    pub fingerprint: String,
    pub last_used: DateTime<Utc>,
    pub trust_level: TrustLevel,
    pub key_type: String,
    pub created_at: DateTime<Utc>,
    pub servers: Vec<ServerRef>,
}

/// A code-signing key tracked in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSigningKey {
    pub id: String,
    pub key_alias: String,
    pub algorithm: String,
    pub protection_level: ProtectionLevel,
    pub created_at: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub usage: String,
    pub status: KeyStatus,
}

/// Closed enumeration of audit log action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    CertificateRenewed,
    CertificateViewed,
    CertificateUpdated,
    CertificateExported,
    CertificateAutoRenewed,
    CertificateExpiryWarning,
    CertificateDiscovery,
    SshKeyUsed,
    SshKeyCreated,
    SshKeyRevoked,
    SshKeyUpdated,
    CodeSigningKeyCreated,
    CodeSigningKeyUsed,
    CodeSigningKeyUpdated,
    CodeSigningKeyExported,
    CodeSigningKeyRotated,
    AccessReviewCompleted,
    ComplianceScanCompleted,
    SettingsModified,
    FailedAuthentication,
    HealthCheckFailed,
    ReportGenerated,
    AutomatedCleanup,
}

impl ActionType {
    /// Every action type, in declaration order (for filter dropdowns).
    pub const ALL: [ActionType; 23] = [
        Self::CertificateRenewed,
        Self::CertificateViewed,
        Self::CertificateUpdated,
        Self::CertificateExported,
        Self::CertificateAutoRenewed,
        Self::CertificateExpiryWarning,
        Self::CertificateDiscovery,
        Self::SshKeyUsed,
        Self::SshKeyCreated,
        Self::SshKeyRevoked,
        Self::SshKeyUpdated,
        Self::CodeSigningKeyCreated,
        Self::CodeSigningKeyUsed,
        Self::CodeSigningKeyUpdated,
        Self::CodeSigningKeyExported,
        Self::CodeSigningKeyRotated,
        Self::AccessReviewCompleted,
        Self::ComplianceScanCompleted,
        Self::SettingsModified,
        Self::FailedAuthentication,
        Self::HealthCheckFailed,
        Self::ReportGenerated,
        Self::AutomatedCleanup,
    ];

    /// Wire name (snake_case, matches the fixture encoding).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CertificateRenewed => "certificate_renewed",
            Self::CertificateViewed => "certificate_viewed",
            Self::CertificateUpdated => "certificate_updated",
            Self::CertificateExported => "certificate_exported",
            Self::CertificateAutoRenewed => "certificate_auto_renewed",
            Self::CertificateExpiryWarning => "certificate_expiry_warning",
            Self::CertificateDiscovery => "certificate_discovery",
            Self::SshKeyUsed => "ssh_key_used",
            Self::SshKeyCreated => "ssh_key_created",
            Self::SshKeyRevoked => "ssh_key_revoked",
            Self::SshKeyUpdated => "ssh_key_updated",
            Self::CodeSigningKeyCreated => "code_signing_key_created",
            Self::CodeSigningKeyUsed => "code_signing_key_used",
            Self::CodeSigningKeyUpdated => "code_signing_key_updated",
            Self::CodeSigningKeyExported => "code_signing_key_exported",
            Self::CodeSigningKeyRotated => "code_signing_key_rotated",
            Self::AccessReviewCompleted => "access_review_completed",
            Self::ComplianceScanCompleted => "compliance_scan_completed",
            Self::SettingsModified => "settings_modified",
            Self::FailedAuthentication => "failed_authentication",
            Self::HealthCheckFailed => "health_check_failed",
            Self::ReportGenerated => "report_generated",
            Self::AutomatedCleanup => "automated_cleanup",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action_type: ActionType,
    pub target_resource: String,
    /// Free-form context recorded with the action (string keys, arbitrary
    /// JSON values).
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Active filter criteria for a list view. Unset fields do not constrain
/// the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Free-text substring, matched case-insensitively against the record
    /// type's text fields.
    pub search: Option<String>,
    /// Substring match on a certificate's domain.
    pub domain: Option<String>,
    pub trust_level: Option<TrustLevel>,
    pub protection_level: Option<ProtectionLevel>,
    pub action_type: Option<ActionType>,
    /// Inclusive lower bound on the record's timestamp field.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the record's timestamp field.
    pub date_to: Option<DateTime<Utc>>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Current sort field and direction for a list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Reselecting the current field flips the direction; selecting a new
    /// field resets to ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field && self.direction == SortDirection::Asc {
            self.direction = SortDirection::Desc;
        } else {
            self.field = field.to_owned();
            self.direction = SortDirection::Asc;
        }
    }
}

/// How a list view lays out its records (persisted preference).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Table,
    Grid,
}
