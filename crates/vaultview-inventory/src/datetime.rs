// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display formatting and derived values for timestamps. Every function
// that depends on "now" takes it explicitly so callers (and tests) control
// the reference instant.

use chrono::{DateTime, Utc};

use vaultview_core::types::CertificateStatus;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// `Mar 15, 2025` style display date.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Display date plus time, e.g. `Mar 15, 2025, 02:41 PM`.
pub fn format_date_time(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Relative age of `date` with respect to `now`: `Just now`, minutes,
/// hours, days, and past 30 days the absolute date.
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - date).num_milliseconds();
    let mins = diff_ms.div_euclid(MINUTE_MS);
    let hours = diff_ms.div_euclid(HOUR_MS);
    let days = diff_ms.div_euclid(DAY_MS);

    if mins < 1 {
        return "Just now".to_owned();
    }
    if mins < 60 {
        return format!("{mins} minute{} ago", if mins > 1 { "s" } else { "" });
    }
    if hours < 24 {
        return format!("{hours} hour{} ago", if hours > 1 { "s" } else { "" });
    }
    if days < 30 {
        return format!("{days} day{} ago", if days > 1 { "s" } else { "" });
    }

    format_date(date)
}

/// Signed day count until `expiry` (ceiling — a partial day counts).
pub fn days_until_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (expiry - now).num_milliseconds();
    (diff_ms as f64 / DAY_MS as f64).ceil() as i64
}

/// Live lifecycle classification of a certificate from its expiry
/// timestamp. May disagree with the stored status label; the two are
/// never reconciled.
pub fn derived_certificate_status(
    expiry: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CertificateStatus {
    let days = days_until_expiry(expiry, now);

    if days < 0 {
        return CertificateStatus::Expired;
    }
    if days <= 30 {
        return CertificateStatus::ExpiringSoon;
    }
    CertificateStatus::Active
}

/// Inclusive range check; an unset bound does not constrain.
pub fn is_date_in_range(
    date: DateTime<Utc>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    if let Some(from) = from
        && date < from
    {
        return false;
    }
    if let Some(to) = to
        && date > to
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().expect("timestamp")
    }

    #[test]
    fn date_formats() {
        let date = ts("2025-03-05T14:41:00Z");
        assert_eq!(format_date(date), "Mar 5, 2025");
        assert_eq!(format_date_time(date), "Mar 5, 2025, 02:41 PM");
    }

    #[test]
    fn relative_time_branches() {
        let now = ts("2026-08-06T12:00:00Z");

        assert_eq!(format_relative_time(now, now), "Just now");
        assert_eq!(
            format_relative_time(now - Duration::minutes(1), now),
            "1 minute ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::minutes(45), now),
            "45 minutes ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::hours(3), now),
            "3 hours ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(1), now),
            "1 day ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(29), now),
            "29 days ago"
        );
        // Past 30 days the absolute date takes over.
        assert_eq!(
            format_relative_time(now - Duration::days(31), now),
            "Jul 6, 2026"
        );
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = ts("2026-08-06T12:00:00Z");
        assert_eq!(format_relative_time(now + Duration::hours(2), now), "Just now");
    }

    #[test]
    fn days_until_expiry_rounds_up() {
        let now = ts("2026-08-06T12:00:00Z");

        assert_eq!(days_until_expiry(now + Duration::hours(1), now), 1);
        assert_eq!(days_until_expiry(now + Duration::days(30), now), 30);
        assert_eq!(days_until_expiry(now - Duration::hours(1), now), 0);
        assert_eq!(days_until_expiry(now - Duration::days(2), now), -2);
    }

    #[test]
    fn derived_status_thresholds() {
        let now = ts("2026-08-06T12:00:00Z");

        assert_eq!(
            derived_certificate_status(now + Duration::days(90), now),
            CertificateStatus::Active
        );
        assert_eq!(
            derived_certificate_status(now + Duration::days(30), now),
            CertificateStatus::ExpiringSoon
        );
        assert_eq!(
            derived_certificate_status(now - Duration::days(1) - Duration::hours(1), now),
            CertificateStatus::Expired
        );
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let date = ts("2026-01-15T00:00:00Z");

        assert!(is_date_in_range(date, None, None));
        assert!(is_date_in_range(date, Some(date), Some(date)));
        assert!(!is_date_in_range(
            date,
            Some(ts("2026-01-16T00:00:00Z")),
            None
        ));
        assert!(!is_date_in_range(
            date,
            None,
            Some(ts("2026-01-14T00:00:00Z"))
        ));
    }
}
