//! Session records and the table that holds them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata for one authenticated admin session.
///
/// All timestamps are epoch milliseconds (UTC). `created` and `ip` are
/// fixed at issuance; only `last_activity` moves afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the session was issued (epoch ms).
    pub created: i64,

    /// Most recent confirmed use (epoch ms).
    pub last_activity: i64,

    /// Address the session was issued to. Audit data only; never
    /// consulted for validation.
    pub ip: String,
}

impl SessionRecord {
    /// Create a record issued to `ip` at `now_ms`.
    pub fn new(ip: impl Into<String>, now_ms: i64) -> Self {
        Self {
            created: now_ms,
            last_activity: now_ms,
            ip: ip.into(),
        }
    }

    /// Mark the session as used at `now_ms`.
    pub fn touch(&mut self, now_ms: i64) {
        self.last_activity = now_ms;
    }

    /// Milliseconds since issuance, clamped at zero.
    pub fn age_at(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.created).max(0)
    }

    /// Milliseconds since last confirmed use, clamped at zero.
    pub fn idle_at(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.last_activity).max(0)
    }
}

/// Every live session, keyed by bearer token.
///
/// Serializes as a single flat JSON object (token to record), which is
/// exactly the persisted form. A record that fails to parse fails the
/// whole table; the backends treat that as an empty table rather than
/// guessing at partial contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionTable(HashMap<String, SessionRecord>);

impl SessionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the record for `token`.
    pub fn get(&self, token: &str) -> Option<&SessionRecord> {
        self.0.get(token)
    }

    /// Mutable lookup for `token`.
    pub fn get_mut(&mut self, token: &str) -> Option<&mut SessionRecord> {
        self.0.get_mut(token)
    }

    /// Whether `token` has a record.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains_key(token)
    }

    /// Insert a record for `token`, returning any record it replaced.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        record: SessionRecord,
    ) -> Option<SessionRecord> {
        self.0.insert(token.into(), record)
    }

    /// Remove the record for `token`, returning it if present.
    pub fn remove(&mut self, token: &str) -> Option<SessionRecord> {
        self.0.remove(token)
    }

    /// Keep only the sessions for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &SessionRecord) -> bool,
    {
        self.0.retain(|token, record| keep(token, record));
    }

    /// Drop every session.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate over all (token, record) pairs. Order carries no meaning.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SessionRecord)> {
        self.0.iter()
    }
}
