//! Configuration for the session store.

use std::path::PathBuf;
use std::time::Duration;

/// File name of the persisted session table inside the state directory.
pub const SESSIONS_FILE: &str = "sessions.json";

/// Default session time-to-live: 24 hours, measured from creation.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for a [`SessionStore`](crate::SessionStore).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the persisted session table.
    /// Defaults to `~/.postern` when unset.
    pub state_dir: Option<PathBuf>,

    /// Session time-to-live, measured from creation.
    pub ttl: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            ttl: DEFAULT_TTL,
        }
    }
}

impl StoreConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory holding the persisted session table.
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }

    /// Set the session time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The state directory in effect: the configured one, or `~/.postern`.
    pub fn effective_state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".postern")
        })
    }

    /// Full path of the persisted session table.
    pub fn sessions_path(&self) -> PathBuf {
        self.effective_state_dir().join(SESSIONS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert!(config.state_dir.is_none());
        assert_eq!(config.ttl, DEFAULT_TTL);
    }

    #[test]
    fn test_builder_methods() {
        let config = StoreConfig::new()
            .with_state_dir("/tmp/postern-test")
            .with_ttl(Duration::from_secs(60));

        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/postern-test")));
        assert_eq!(config.ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_sessions_path_joins_file_name() {
        let config = StoreConfig::new().with_state_dir("/srv/postern");
        assert_eq!(
            config.sessions_path(),
            PathBuf::from("/srv/postern").join(SESSIONS_FILE)
        );
    }

    #[test]
    fn test_effective_state_dir_defaults_under_home() {
        let config = StoreConfig::new();
        let dir = config.effective_state_dir();
        assert!(dir.ends_with(".postern"));
    }
}
