//! A mock identity source serving the fictional payloads in `mock_data`.

use std::sync::{PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use gatekeep_contracts::{
    error::{GatekeepError, GatekeepResult},
    session::SessionId,
};
use gatekeep_core::traits::IdentitySource;

use crate::mock_data::{identity_payload, OFFLINE_IDENTITY};

/// Serves the payload of whichever mock identity is currently signed in.
///
/// The identity can be switched between fetches to simulate a backend role
/// change followed by a `PermissionsChanged` event.
pub struct MockIdentitySource {
    identity: RwLock<String>,
}

impl MockIdentitySource {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: RwLock::new(identity.into()),
        }
    }

    /// Switch the identity served by subsequent fetches.
    pub fn switch_to(&self, identity: impl Into<String>) {
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = identity.into();
    }

    pub fn identity(&self) -> String {
        self.identity.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl IdentitySource for MockIdentitySource {
    fn fetch(&self, session: &SessionId) -> GatekeepResult<Value> {
        let identity = self.identity();
        debug!(session_id = %session, identity = %identity, "fetching mock identity payload");

        if identity == OFFLINE_IDENTITY {
            return Err(GatekeepError::IdentityFetchFailed {
                reason: "GET auth/rbac/me: connection refused".to_string(),
            });
        }

        identity_payload(&identity).ok_or(GatekeepError::UnknownIdentity { name: identity })
    }
}
