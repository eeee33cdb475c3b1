//! Durable session store for the Postern admin gate.
//!
//! A session is the proof that a caller passed the admin login check: an
//! opaque bearer token mapped to when it was issued, when it was last
//! used, and the address it was issued to. This crate owns the lifecycle
//! of those records:
//! - create / fetch / refresh / delete for individual sessions
//! - sweep to remove sessions older than the TTL
//! - count, list, and clear over the whole table
//!
//! The table lives in one JSON file. Every operation loads the whole
//! table, mutates it, and writes it back atomically, serialized by an
//! internal lock, so the persisted file is always a complete snapshot.
//! Password checks, cookies, and HTTP plumbing belong to the embedding
//! application, not here.
//!
//! # Example
//!
//! ```rust,ignore
//! use postern_session::{SessionStore, StoreConfig};
//!
//! let config = StoreConfig::new().with_state_dir("/var/lib/postern");
//! let store = SessionStore::open(config);
//!
//! let record = store.create(&token, "203.0.113.7").await?;
//! ```

mod backend;
mod config;
mod error;
mod expiry;
mod record;
mod store;

pub use backend::{FileBackend, MemoryBackend, TableBackend};
pub use config::{DEFAULT_TTL, SESSIONS_FILE, StoreConfig};
pub use error::{Result, StoreError};
pub use expiry::{ExpiryPolicy, now_millis};
pub use record::{SessionRecord, SessionTable};
pub use store::SessionStore;
