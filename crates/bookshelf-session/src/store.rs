//! Session store
//!
//! Handles session persistence and hydration. The store persists on
//! every mutation and hydrates once when opened, so a component
//! reconstructed over the same storage handle observes the last stored
//! session.

use parking_lot::RwLock;
use std::sync::Arc;

use bookshelf_storage::Database;

use crate::session::UserSession;

/// Storage key for the persisted session snapshot.
const SESSION_KEY: &str = "user_session";

/// Process-wide holder of the current authenticated user.
///
/// Explicitly constructed and passed (or cloned) into whatever needs it;
/// clones share the same underlying state. All operations are total:
/// storage failures are logged and absorbed, never returned.
pub struct SessionStore {
    current: Arc<RwLock<UserSession>>,
    db: Database,
}

impl SessionStore {
    /// Open the store, restoring the last persisted session if one
    /// exists. A missing, unreadable, or failing snapshot yields the
    /// logged-out default.
    pub fn open(db: Database) -> Self {
        let current = match db.get_setting(SESSION_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored session is unreadable, starting logged out");
                    UserSession::default()
                }
            },
            Ok(None) => UserSession::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored session, starting logged out");
                UserSession::default()
            }
        };

        if current.is_logged_in() {
            tracing::info!(user_id = %current.id, "Restored user session");
        }

        Self {
            current: Arc::new(RwLock::new(current)),
            db,
        }
    }

    /// Overwrite all four session fields with the given user's values.
    ///
    /// Field contents are taken as-is, empty or otherwise. The new state
    /// is persisted after the in-memory update.
    pub fn set_session(&self, user: UserSession) {
        tracing::info!(user_id = %user.id, role = %user.role_name, "Session set");
        *self.current.write() = user;
        self.persist();
    }

    /// Reset every session field to the logged-out default. Idempotent.
    pub fn clear_session(&self) {
        tracing::info!("Session cleared");
        *self.current.write() = UserSession::default();
        self.persist();
    }

    /// The current bearer token, `""` when logged out.
    pub fn token(&self) -> String {
        self.current.read().token.clone()
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> UserSession {
        self.current.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.read().is_logged_in()
    }

    /// Write the current state to storage. A failed write leaves the
    /// in-memory state correct but not durable across a reload.
    fn persist(&self) {
        let snapshot = self.current.read().clone();

        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode session, persistence skipped");
                return;
            }
        };

        if let Err(e) = self.db.set_setting(SESSION_KEY, &json) {
            tracing::warn!(error = %e, "Failed to persist session, state kept in memory only");
        }
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            db: self.db.clone(),
        }
    }
}
