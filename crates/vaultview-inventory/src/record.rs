// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// What a record type must provide for the generic list controller: a
// stable identifier, its cache dataset key, the filter predicate, and the
// by-field comparator. One implementation per asset type replaces the
// four per-view copies of this logic.

use std::cmp::Ordering;

use serde::Serialize;
use serde::de::DeserializeOwned;

use vaultview_core::types::{
    AuditLogEntry, Certificate, CodeSigningKey, FilterState, SshKey,
};

use crate::datetime::is_date_in_range;

/// A record type the list controller can filter, sort, page, and cache.
pub trait InventoryRecord: Clone + Serialize + DeserializeOwned + 'static {
    /// Cache key for this record type's full set.
    const DATASET: &'static str;

    /// Stable identifier, unique within the set.
    fn id(&self) -> &str;

    /// Whether the record passes every active criterion in `filter`.
    fn matches(&self, filter: &FilterState) -> bool;

    /// Compare against `other` on the named sort field. Unknown fields
    /// compare equal, leaving the incoming order untouched.
    fn compare_by(&self, field: &str, other: &Self) -> Ordering;
}

/// Case-insensitive substring match.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive ordering with a deterministic tie-break on the raw
/// strings.
fn cmp_ci(a: &str, b: &str) -> Ordering {
    match a.to_lowercase().cmp(&b.to_lowercase()) {
        Ordering::Equal => a.cmp(b),
        ord => ord,
    }
}

impl InventoryRecord for Certificate {
    const DATASET: &'static str = "certificates";

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &FilterState) -> bool {
        if let Some(domain) = &filter.domain
            && !domain.is_empty()
            && !contains_ci(&self.domain, domain)
        {
            return false;
        }
        if let Some(search) = &filter.search
            && !search.is_empty()
            && !(contains_ci(&self.name, search)
                || contains_ci(&self.domain, search)
                || contains_ci(&self.issuer, search))
        {
            return false;
        }
        is_date_in_range(self.expiry_date, filter.date_from, filter.date_to)
    }

    fn compare_by(&self, field: &str, other: &Self) -> Ordering {
        match field {
            "name" => cmp_ci(&self.name, &other.name),
            "domain" => cmp_ci(&self.domain, &other.domain),
            "issuer" => cmp_ci(&self.issuer, &other.issuer),
            "algorithm" => cmp_ci(&self.algorithm, &other.algorithm),
            "issued_date" => self.issued_date.cmp(&other.issued_date),
            "expiry_date" => self.expiry_date.cmp(&other.expiry_date),
            _ => Ordering::Equal,
        }
    }
}

impl InventoryRecord for SshKey {
    const DATASET: &'static str = "ssh-keys";

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &FilterState) -> bool {
        if let Some(search) = &filter.search
            && !search.is_empty()
            && !(contains_ci(&self.key_owner, search) || contains_ci(&self.fingerprint, search))
        {
            return false;
        }
        if let Some(trust) = filter.trust_level
            && self.trust_level != trust
        {
            return false;
        }
        is_date_in_range(self.last_used, filter.date_from, filter.date_to)
    }

    fn compare_by(&self, field: &str, other: &Self) -> Ordering {
        match field {
            "trust_level" => self.trust_level.rank().cmp(&other.trust_level.rank()),
            "key_owner" => cmp_ci(&self.key_owner, &other.key_owner),
            "fingerprint" => cmp_ci(&self.fingerprint, &other.fingerprint),
            "key_type" => cmp_ci(&self.key_type, &other.key_type),
            "last_used" => self.last_used.cmp(&other.last_used),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }
}

impl InventoryRecord for CodeSigningKey {
    const DATASET: &'static str = "code-signing-keys";

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &FilterState) -> bool {
        if let Some(protection) = filter.protection_level
            && self.protection_level != protection
        {
            return false;
        }
        if let Some(search) = &filter.search
            && !search.is_empty()
            && !(contains_ci(&self.key_alias, search) || contains_ci(&self.usage, search))
        {
            return false;
        }
        is_date_in_range(self.expiry_date, filter.date_from, filter.date_to)
    }

    fn compare_by(&self, field: &str, other: &Self) -> Ordering {
        match field {
            "key_alias" => cmp_ci(&self.key_alias, &other.key_alias),
            "algorithm" => cmp_ci(&self.algorithm, &other.algorithm),
            "created_at" => self.created_at.cmp(&other.created_at),
            "last_used" => self.last_used.cmp(&other.last_used),
            "expiry_date" => self.expiry_date.cmp(&other.expiry_date),
            _ => Ordering::Equal,
        }
    }
}

impl InventoryRecord for AuditLogEntry {
    const DATASET: &'static str = "audit-logs";

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &FilterState) -> bool {
        if let Some(action) = filter.action_type
            && self.action_type != action
        {
            return false;
        }
        if let Some(search) = &filter.search
            && !search.is_empty()
            && !(contains_ci(&self.actor, search) || contains_ci(&self.target_resource, search))
        {
            return false;
        }
        is_date_in_range(self.timestamp, filter.date_from, filter.date_to)
    }

    fn compare_by(&self, field: &str, other: &Self) -> Ordering {
        match field {
            "timestamp" => self.timestamp.cmp(&other.timestamp),
            "actor" => cmp_ci(&self.actor, &other.actor),
            "action_type" => self.action_type.as_str().cmp(other.action_type.as_str()),
            "target_resource" => cmp_ci(&self.target_resource, &other.target_resource),
            _ => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultview_core::types::{ProtectionLevel, TrustLevel};

    fn ssh_key(owner: &str, fingerprint: &str, trust: TrustLevel) -> SshKey {
        SshKey {
            id: format!("key-{owner}"),
            key_owner: owner.into(),
            fingerprint: fingerprint.into(),
            last_used: "2026-08-01T09:00:00Z".parse().expect("timestamp"),
            trust_level: trust,
            key_type: "ed25519".into(),
            created_at: "2024-06-11T00:00:00Z".parse().expect("timestamp"),
            servers: Vec::new(),
        }
    }

    #[test]
    fn ssh_search_covers_owner_and_fingerprint() {
        let key = ssh_key("alice", "SHA256:AbCdEf", TrustLevel::High);

        let mut filter = FilterState {
            search: Some("ALIC".into()),
            ..FilterState::default()
        };
        assert!(key.matches(&filter));

        filter.search = Some("abcde".into());
        assert!(key.matches(&filter));

        filter.search = Some("bob".into());
        assert!(!key.matches(&filter));
    }

    #[test]
    fn empty_search_does_not_constrain() {
        let key = ssh_key("alice", "SHA256:x", TrustLevel::Low);
        let filter = FilterState {
            search: Some(String::new()),
            ..FilterState::default()
        };
        assert!(key.matches(&filter));
    }

    #[test]
    fn trust_level_filter_is_exact() {
        let key = ssh_key("alice", "SHA256:x", TrustLevel::Medium);
        let mut filter = FilterState {
            trust_level: Some(TrustLevel::Medium),
            ..FilterState::default()
        };
        assert!(key.matches(&filter));

        filter.trust_level = Some(TrustLevel::High);
        assert!(!key.matches(&filter));
    }

    #[test]
    fn trust_level_sorts_by_rank_not_name() {
        // Alphabetically "high" < "low", so a lexical sort would invert
        // the intended order.
        let high = ssh_key("a", "f1", TrustLevel::High);
        let low = ssh_key("b", "f2", TrustLevel::Low);
        assert_eq!(high.compare_by("trust_level", &low), Ordering::Greater);
    }

    #[test]
    fn unknown_sort_field_compares_equal() {
        let a = ssh_key("a", "f1", TrustLevel::High);
        let b = ssh_key("b", "f2", TrustLevel::Low);
        assert_eq!(a.compare_by("nonexistent", &b), Ordering::Equal);
    }

    #[test]
    fn certificate_domain_filter_is_substring_ci() {
        let cert = Certificate {
            id: "cert-001".into(),
            name: "api gateway".into(),
            domain: "API.Example.COM".into(),
            issuer: "Example CA".into(),
            status: vaultview_core::types::CertificateStatus::Active,
            issued_date: "2025-01-01T00:00:00Z".parse().expect("timestamp"),
            expiry_date: "2026-12-01T00:00:00Z".parse().expect("timestamp"),
            algorithm: "RSA-2048".into(),
            serial_number: "00:11".into(),
        };

        let mut filter = FilterState {
            domain: Some("example.com".into()),
            ..FilterState::default()
        };
        assert!(cert.matches(&filter));

        filter.domain = Some("internal".into());
        assert!(!cert.matches(&filter));
    }

    #[test]
    fn protection_level_filter_is_exact() {
        let key = CodeSigningKey {
            id: "cs-001".into(),
            key_alias: "release-signing".into(),
            algorithm: "RSA-4096".into(),
            protection_level: ProtectionLevel::Hsm,
            created_at: "2024-01-01T00:00:00Z".parse().expect("timestamp"),
            last_used: "2026-08-01T00:00:00Z".parse().expect("timestamp"),
            expiry_date: "2027-01-01T00:00:00Z".parse().expect("timestamp"),
            usage: "Android releases".into(),
            status: vaultview_core::types::KeyStatus::Active,
        };

        let mut filter = FilterState {
            protection_level: Some(ProtectionLevel::Hsm),
            ..FilterState::default()
        };
        assert!(key.matches(&filter));

        filter.protection_level = Some(ProtectionLevel::Software);
        assert!(!key.matches(&filter));
    }
}
