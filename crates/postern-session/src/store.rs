//! The session store: lifecycle operations over a durable table.

use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::backend::{FileBackend, TableBackend};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::expiry::{ExpiryPolicy, now_millis};
use crate::record::SessionRecord;

/// Durable store for admin sessions.
///
/// The backend is the single source of truth: every operation loads the
/// whole table, mutates it, and saves it back, with nothing cached in
/// between. An internal mutex holds each load-mutate-save cycle to one
/// caller at a time, so concurrent operations on one store cannot
/// overwrite each other's changes. Run one store instance per table;
/// the lock serializes nothing across processes.
pub struct SessionStore<B: TableBackend = FileBackend> {
    backend: Mutex<B>,
    policy: ExpiryPolicy,
    config: StoreConfig,
}

impl SessionStore<FileBackend> {
    /// Open a store persisting to `config.sessions_path()`.
    pub fn open(config: StoreConfig) -> Self {
        let backend = FileBackend::new(config.sessions_path());
        Self::with_backend(config, backend)
    }
}

impl<B: TableBackend> SessionStore<B> {
    /// Build a store over an explicit backend.
    pub fn with_backend(config: StoreConfig, backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
            policy: ExpiryPolicy::new(config.ttl),
            config,
        }
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The expiry policy derived from the configured TTL.
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Record a freshly authenticated session under `token`.
    ///
    /// `created` and `last_activity` both start now. Tokens are expected
    /// to be caller-generated with enough entropy to never collide;
    /// re-using one replaces the previous record.
    pub async fn create(&self, token: &str, ip: &str) -> Result<SessionRecord> {
        let backend = self.backend.lock().await;
        let mut table = backend.load();

        let record = SessionRecord::new(ip, now_millis());
        table.insert(token, record.clone());
        backend.save(&table)?;

        debug!(session = %token_tag(token), ip = %ip, sessions = table.len(), "Session created");
        Ok(record)
    }

    /// Look up the record for `token`.
    ///
    /// Returns `None` for a token that never existed, was deleted, or was
    /// swept; the store does not distinguish. An expired record that has
    /// not been swept yet is still returned. Callers that care about
    /// staleness judge the record against [`Self::policy`].
    pub async fn fetch(&self, token: &str) -> Option<SessionRecord> {
        let backend = self.backend.lock().await;
        let record = backend.load().get(token).cloned();

        match &record {
            Some(_) => trace!(session = %token_tag(token), "Session found"),
            None => trace!(session = %token_tag(token), "Session not found"),
        }
        record
    }

    /// Mark `token` as used now. Unknown tokens are ignored.
    pub async fn refresh(&self, token: &str) -> Result<()> {
        let backend = self.backend.lock().await;
        let mut table = backend.load();

        match table.get_mut(token) {
            Some(record) => {
                record.touch(now_millis());
                backend.save(&table)?;
                debug!(session = %token_tag(token), "Session refreshed");
            }
            None => {
                trace!(session = %token_tag(token), "Refresh for unknown session ignored");
            }
        }
        Ok(())
    }

    /// Remove the session for `token` (logout). Deleting a token that is
    /// not present is a no-op, so logout never fails for being late.
    pub async fn delete(&self, token: &str) -> Result<()> {
        let backend = self.backend.lock().await;
        let mut table = backend.load();

        if table.remove(token).is_some() {
            backend.save(&table)?;
            debug!(session = %token_tag(token), sessions = table.len(), "Session deleted");
        } else {
            trace!(session = %token_tag(token), "Delete for unknown session ignored");
        }
        Ok(())
    }

    /// Remove every session older than the TTL and return how many went.
    ///
    /// Only persists when something was actually removed; a sweep that
    /// finds nothing expired leaves the file untouched.
    pub async fn sweep(&self) -> Result<usize> {
        let backend = self.backend.lock().await;
        let mut table = backend.load();

        let now = now_millis();
        let before = table.len();
        table.retain(|_, record| !self.policy.is_expired_at(record, now));
        let removed = before - table.len();

        if removed > 0 {
            backend.save(&table)?;
            debug!(removed, remaining = table.len(), "Swept expired sessions");
        }
        Ok(removed)
    }

    /// Number of sessions in the table, expired or not.
    pub async fn count(&self) -> usize {
        let backend = self.backend.lock().await;
        backend.load().len()
    }

    /// All sessions, newest first. Ties break on token so the order is
    /// stable.
    pub async fn list(&self) -> Vec<(String, SessionRecord)> {
        let backend = self.backend.lock().await;
        let table = backend.load();

        let mut entries: Vec<(String, SessionRecord)> = table
            .iter()
            .map(|(token, record)| (token.clone(), record.clone()))
            .collect();
        entries.sort_by(|a, b| b.1.created.cmp(&a.1.created).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// Remove every session, expired or not, and return how many went.
    pub async fn clear(&self) -> Result<usize> {
        let backend = self.backend.lock().await;
        let mut table = backend.load();

        let removed = table.len();
        if removed > 0 {
            table.clear();
            backend.save(&table)?;
            debug!(removed, "Cleared all sessions");
        }
        Ok(removed)
    }
}

/// Short token prefix, safe for log lines.
fn token_tag(token: &str) -> String {
    token.chars().take(8).collect()
}
