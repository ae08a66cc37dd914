//! Session wiring: lifecycle events in, snapshot replacements out.
//!
//! `Session` connects the identity source, the payload parser, and the
//! snapshot store:
//!
//!   LoggedIn / PermissionsChanged → fetch → parse → replace
//!   LoggedOut / AuthenticationFailed → clear
//!
//! A fetch or parse failure clears the store and ends the session before the
//! error is returned.
//!
//! Fetches run without holding any lock. Each load is stamped with a
//! generation number, and every later event bumps it. A load commits its
//! snapshot only if its generation is still current, checked under the same
//! lock that logout takes before clearing. A fetch that completes after a
//! logout, or after a newer load started, is discarded.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use gatekeep_contracts::{
    error::GatekeepResult,
    session::{SessionEvent, SessionId},
};

use crate::{
    store::SnapshotStore,
    traits::{IdentitySource, PayloadParser},
};

/// What applying a session event did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A fresh snapshot was loaded.
    Loaded {
        revision: u64,
        permissions: usize,
        roles: usize,
    },
    /// The store was reset to the unauthenticated snapshot.
    Cleared { revision: u64 },
    /// The event referred to a session that is not the active one.
    Ignored,
    /// The fetched grants were dropped: a logout or a newer load happened
    /// while they were in flight.
    Superseded,
}

struct SessionState {
    active: Option<SessionId>,
    /// Bumped by every event that starts a load or ends the session.
    generation: u64,
}

/// Drives the snapshot store from session lifecycle events.
pub struct Session {
    source: Box<dyn IdentitySource>,
    parser: Box<dyn PayloadParser>,
    store: Arc<SnapshotStore>,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(
        source: Box<dyn IdentitySource>,
        parser: Box<dyn PayloadParser>,
        store: Arc<SnapshotStore>,
    ) -> Self {
        Self {
            source,
            parser,
            store,
            state: Mutex::new(SessionState {
                active: None,
                generation: 0,
            }),
        }
    }

    /// The store this session writes to.
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// The currently active session, if any.
    pub fn active(&self) -> Option<SessionId> {
        self.state().active.clone()
    }

    /// Apply one lifecycle event.
    ///
    /// # Errors
    ///
    /// Returns the fetch or parse error when loading grants fails. The store
    /// has already been cleared and the session ended when this happens.
    pub fn apply(&self, event: SessionEvent) -> GatekeepResult<SessionOutcome> {
        match event {
            SessionEvent::LoggedIn { session_id } => {
                info!(session_id = %session_id, "session established");
                let generation = {
                    let mut state = self.state();
                    state.active = Some(session_id.clone());
                    state.generation += 1;
                    state.generation
                };
                self.load(&session_id, generation)
            }

            SessionEvent::PermissionsChanged { session_id } => {
                let generation = {
                    let mut state = self.state();
                    if state.active.as_ref() != Some(&session_id) {
                        debug!(
                            session_id = %session_id,
                            "permissions change for inactive session ignored"
                        );
                        return Ok(SessionOutcome::Ignored);
                    }
                    state.generation += 1;
                    state.generation
                };
                info!(session_id = %session_id, "refreshing permissions");
                self.load(&session_id, generation)
            }

            SessionEvent::LoggedOut => {
                info!("session ended");
                Ok(SessionOutcome::Cleared {
                    revision: self.end_session(),
                })
            }

            SessionEvent::AuthenticationFailed { reason } => {
                warn!(%reason, "authentication failed; clearing permissions");
                Ok(SessionOutcome::Cleared {
                    revision: self.end_session(),
                })
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deactivate the session and clear the store under the state lock, so no
    /// in-flight load can commit between the two.
    fn end_session(&self) -> u64 {
        let mut state = self.state();
        state.active = None;
        state.generation += 1;
        self.store.clear()
    }

    fn load(&self, session_id: &SessionId, generation: u64) -> GatekeepResult<SessionOutcome> {
        let fetched = self
            .source
            .fetch(session_id)
            .and_then(|raw| self.parser.parse(&raw));

        let mut state = self.state();
        if state.generation != generation {
            debug!(
                session_id = %session_id,
                generation,
                current = state.generation,
                "discarding grants from a superseded load"
            );
            return Ok(SessionOutcome::Superseded);
        }

        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    session_id = %session_id,
                    error = %e,
                    "could not load permissions; falling back to no access"
                );
                state.active = None;
                state.generation += 1;
                self.store.clear();
                return Err(e);
            }
        };

        let permissions = snapshot.permission_count();
        let roles = snapshot.role_count();
        let revision = self.store.replace(snapshot);

        Ok(SessionOutcome::Loaded {
            revision,
            permissions,
            roles,
        })
    }
}
