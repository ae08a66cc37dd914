//! Session identity and lifecycle events.
//!
//! These are the signals the auth/session collaborator emits. The session
//! wiring in gatekeep-core turns them into snapshot store updates.

use serde::{Deserialize, Serialize};

/// Unique identifier for one authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A session lifecycle signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A session was established or restored. Grants must be fetched.
    LoggedIn { session_id: SessionId },

    /// The backend reports that the user's grants changed (e.g. a role was
    /// reassigned). Grants must be re-fetched.
    PermissionsChanged { session_id: SessionId },

    /// The user logged out.
    LoggedOut,

    /// Authentication was rejected or expired.
    AuthenticationFailed { reason: String },
}
