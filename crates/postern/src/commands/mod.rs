//! CLI command handlers.

pub mod grant;
pub mod list;
pub mod revoke;
pub mod status;
pub mod sweep;

use chrono::{DateTime, Utc};
use postern_session::{SessionStore, StoreConfig};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Store configuration (state directory and TTL).
    pub config: StoreConfig,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Open the session store this invocation operates on.
    pub fn open_store(&self) -> SessionStore {
        SessionStore::open(self.config.clone())
    }
}

/// Format an epoch-ms timestamp for human output.
pub fn fmt_timestamp(ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "-".to_string(),
    }
}

/// Format a millisecond span as hours and minutes.
pub fn fmt_duration_ms(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

/// Mask a token for display, keeping just enough to recognize it.
/// Walks chars, not bytes: stored tokens are arbitrary strings.
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count > 8 {
        let prefix: String = token.chars().take(4).collect();
        let suffix: String = token.chars().skip(count - 4).collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "****".to_string()
    }
}
