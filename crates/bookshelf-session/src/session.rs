//! User session data structure

use serde::{Deserialize, Serialize};

/// The authenticated user's identity and credential.
///
/// All-empty fields mean "logged out"; `Default` produces that state.
/// There is no partial-update path: the record is assigned and cleared
/// wholesale by [`crate::SessionStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Account identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Authorization role label, opaque to the client
    pub role_name: String,
    /// Bearer credential sent in the Authorization header
    pub token: String,
}

impl UserSession {
    pub fn new(id: String, name: String, role_name: String, token: String) -> Self {
        Self {
            id,
            name,
            role_name,
            token,
        }
    }

    /// Whether this session carries a credential.
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }
}
