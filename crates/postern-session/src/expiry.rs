//! Expiry policy for session records.

use std::time::Duration;

use chrono::Utc;

use crate::record::SessionRecord;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Fixed time-to-live rule for sessions.
///
/// A session expires once it is strictly older than the TTL, measured
/// from `created`. Activity does not move the horizon: refreshing a
/// session changes `last_activity` but never buys it more time.
///
/// The policy only judges records; it never removes them. Removal is the
/// store's job (see [`SessionStore::sweep`](crate::SessionStore::sweep)),
/// so a record can be expired and still present until the next sweep.
#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    ttl_ms: i64,
}

impl ExpiryPolicy {
    /// Build a policy with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl_ms: ttl.as_millis().min(i64::MAX as u128) as i64,
        }
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms as u64)
    }

    /// Whether `record` is expired at `now_ms`.
    pub fn is_expired_at(&self, record: &SessionRecord, now_ms: i64) -> bool {
        now_ms.saturating_sub(record.created) > self.ttl_ms
    }

    /// Whether `record` is expired right now.
    pub fn is_expired(&self, record: &SessionRecord) -> bool {
        self.is_expired_at(record, now_millis())
    }

    /// The epoch-ms instant after which `record` counts as expired.
    pub fn expires_at(&self, record: &SessionRecord) -> i64 {
        record.created.saturating_add(self.ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_ms(ttl_ms: u64) -> ExpiryPolicy {
        ExpiryPolicy::new(Duration::from_millis(ttl_ms))
    }

    #[test]
    fn test_expired_only_strictly_past_ttl() {
        let policy = policy_ms(100);
        let record = SessionRecord::new("10.0.0.1", 1_000);

        assert!(!policy.is_expired_at(&record, 1_099));
        // Exactly at the TTL boundary the session is still valid.
        assert!(!policy.is_expired_at(&record, 1_100));
        assert!(policy.is_expired_at(&record, 1_101));
    }

    #[test]
    fn test_activity_does_not_extend_ttl() {
        let policy = policy_ms(100);
        let mut record = SessionRecord::new("10.0.0.1", 1_000);
        record.touch(1_100);

        assert!(policy.is_expired_at(&record, 1_101));
    }

    #[test]
    fn test_expires_at_is_created_plus_ttl() {
        let policy = policy_ms(100);
        let record = SessionRecord::new("10.0.0.1", 1_000);
        assert_eq!(policy.expires_at(&record), 1_100);
    }

    #[test]
    fn test_future_created_is_not_expired() {
        let policy = policy_ms(100);
        let record = SessionRecord::new("10.0.0.1", 5_000);
        assert!(!policy.is_expired_at(&record, 1_000));
    }

    #[test]
    fn test_ttl_round_trips() {
        let policy = ExpiryPolicy::new(Duration::from_secs(30));
        assert_eq!(policy.ttl(), Duration::from_secs(30));
    }
}
